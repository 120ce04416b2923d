//! Operation counts for LLOID filter banks.
//!
//! In LLOID each time slice is filtered at its own rate against a rank-reduced set of
//! basis channels. A cheap composite detection statistic is formed from those channels
//! on every sample. The expensive projection back into the full template space only
//! runs while a candidate is above threshold, and is amortized by a duty cycle.

use crate::{Convolution, Error, TemplateBank, TimeSlice, resample_ops};

/// Fraction of samples that reconstruction runs on when none is given.
pub const DEFAULT_RECONSTRUCTION_DUTY_CYCLE: f64 = 0.05;

/// Resampling filter length used by the cascade models.
pub const CASCADE_RESAMPLE_KERNEL_LENGTH: u32 = 64;

/// Parameters shared by the LLOID models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloidOptions {
    /// Number of taps in every interpolation and decimation filter.
    pub resample_kernel_length: u32,

    /// Fraction of samples on which the reconstruction runs, in `[0, 1]`.
    ///
    /// 1 models a pipeline that always reconstructs every template.
    pub reconstruction_duty_cycle: f64,
}

impl Default for LloidOptions {
    fn default() -> Self {
        Self {
            resample_kernel_length: crate::DEFAULT_RESAMPLE_KERNEL_LENGTH,
            reconstruction_duty_cycle: DEFAULT_RECONSTRUCTION_DUTY_CYCLE,
        }
    }
}

impl LloidOptions {
    /// Defaults for the cascade models, which get away with shorter resampling filters.
    #[must_use]
    pub fn cascade() -> Self {
        Self {
            resample_kernel_length: CASCADE_RESAMPLE_KERNEL_LENGTH,
            ..Default::default()
        }
    }

    /// The same options, reconstructing on `reconstruction_duty_cycle` of samples.
    #[must_use]
    pub fn with_duty_cycle(self, reconstruction_duty_cycle: f64) -> Self {
        Self {
            reconstruction_duty_cycle,
            ..self
        }
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        let duty_cycle = self.reconstruction_duty_cycle;
        if !(0. ..=1.).contains(&duty_cycle) {
            return Err(Error::InvalidDutyCycle(duty_cycle));
        }
        crate::conv::check_kernel_length(self.resample_kernel_length)
    }
}

/// The part of a slice's cost that is paid on every sample: filter the slice against
/// `conv_channels` basis channels and fold them into the composite detection statistic
/// at a cost of `composite_ops_per_channel` per channel.
pub(crate) fn detection_ops<C: Convolution>(
    conv: &C,
    bank: &TemplateBank,
    slice: &TimeSlice,
    resample_kernel_length: u32,
    conv_channels: u32,
    composite_ops_per_channel: f64,
) -> Result<f64, Error> {
    let max_rate = bank.max_rate();
    let rate = slice.rate();
    let relative_rate = bank.relative_rate(slice);
    let channels = f64::from(slice.channel_count());

    // Only the input is decimated; the channels are created at the slice's rate.
    let decimate = resample_ops(resample_kernel_length, max_rate, rate, 1)?;
    let filter = conv.ops(slice.kernel_length(), conv_channels)? * relative_rate;

    // Square, weight and sum each channel.
    let composite = composite_ops_per_channel * channels * relative_rate;
    let interpolate = resample_ops(resample_kernel_length, rate, max_rate, 1)?;
    let accumulate = 1.;
    Ok(decimate + filter + composite + interpolate + accumulate)
}

/// Operations per output sample for a flat LLOID filter bank, where every slice is
/// interpolated straight to the bank's maximum rate.
///
/// # Errors
///
/// - [`Error::InvalidDutyCycle`] if the duty cycle is outside `[0, 1]`.
/// - [`Error::ZeroKernelLength`] if the resampling filter has no taps.
/// - Any error the convolution realization reports for a slice's kernel.
///
/// # Examples
///
/// ```
/// # use flopbudget_cost::{LloidOptions, TemplateBank, TimeDomain, lloid_ops};
/// let bank = TemplateBank::from_parallel(&[8], &[100], &[4096.], 16).unwrap();
/// let ops = lloid_ops(&TimeDomain, &bank, &LloidOptions::default()).unwrap();
/// // 1600 to filter, 3 * 8 + 1 for the composite statistic, and 5% of 2 * 8 * 16 + 16.
/// assert!((ops - 1638.6).abs() < 1e-9);
/// ```
pub fn lloid_ops<C: Convolution>(
    conv: &C,
    bank: &TemplateBank,
    options: &LloidOptions,
) -> Result<f64, Error> {
    options.check()?;
    let LloidOptions {
        resample_kernel_length,
        reconstruction_duty_cycle,
    } = *options;
    let max_rate = bank.max_rate();
    let n = bank.reconstruction_dim();

    bank.slices()
        .iter()
        .map(|slice| -> Result<f64, Error> {
            let detection = detection_ops(
                conv,
                bank,
                slice,
                resample_kernel_length,
                slice.channel_count(),
                3.,
            )?;

            // channel_count x N matrix multiply back to the full template space,
            // then interpolate and accumulate all N reconstructed outputs.
            let reconstruct = 2.
                * f64::from(slice.channel_count())
                * f64::from(n)
                * bank.relative_rate(slice);
            let interpolate = resample_ops(resample_kernel_length, slice.rate(), max_rate, n)?;
            let accumulate = f64::from(n);

            Ok(detection + reconstruction_duty_cycle * (reconstruct + interpolate + accumulate))
        })
        .sum()
}
