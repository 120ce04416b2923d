//! Cascaded LLOID filter banks.
//!
//! Instead of interpolating every slice's reconstruction straight to the maximum rate,
//! slices are visited from the lowest rate up and each partial reconstruction is
//! interpolated only to the next tier's rate, where it is added to that tier's output.
//! Resampling between adjacent tiers is much cheaper than jumping to the maximum rate.

use crate::{Convolution, Error, LloidOptions, TemplateBank, lloid::detection_ops, resample_ops};

/// How the rate tiers of a cascade are chained together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Topology {
    /// Each tier's reconstruction is interpolated to the next tier and accumulated there.
    #[default]
    Chained,

    /// As [`Topology::Chained`], but filtering and reconstruction use half of each
    /// slice's channels.
    HalvedRank,
}

impl Topology {
    fn conv_channels(self, channel_count: u32) -> u32 {
        match self {
            Topology::Chained => channel_count,
            Topology::HalvedRank => channel_count / 2,
        }
    }

    fn composite_ops_per_channel(self) -> f64 {
        match self {
            Topology::Chained => 3.,
            Topology::HalvedRank => 2.5,
        }
    }

    fn reconstruction_channels(self, channel_count: u32) -> f64 {
        match self {
            Topology::Chained => f64::from(channel_count),
            Topology::HalvedRank => f64::from(channel_count) / 2.,
        }
    }
}

/// Operations per output sample for a cascaded LLOID filter bank.
///
/// Slices are visited in [`TemplateBank::cascade_order`]. The lowest tier has nothing to
/// receive from, so it pays neither interpolation nor accumulation of a previous
/// reconstruction.
///
/// # Errors
///
/// - [`Error::InvalidDutyCycle`] if the duty cycle is outside `[0, 1]`.
/// - [`Error::ZeroKernelLength`] if the resampling filter has no taps.
/// - Any error the convolution realization reports for a slice's kernel.
pub fn cascade_ops<C: Convolution>(
    conv: &C,
    bank: &TemplateBank,
    topology: Topology,
    options: &LloidOptions,
) -> Result<f64, Error> {
    options.check()?;
    let LloidOptions {
        resample_kernel_length,
        reconstruction_duty_cycle,
    } = *options;
    let n = f64::from(bank.reconstruction_dim());

    let mut previous_rate = None;
    let mut ops = 0.;
    for slice in bank.cascade_order() {
        let rate = slice.rate();
        let relative_rate = bank.relative_rate(slice);
        ops += detection_ops(
            conv,
            bank,
            slice,
            resample_kernel_length,
            topology.conv_channels(slice.channel_count()),
            topology.composite_ops_per_channel(),
        )?;

        let mut conditional =
            2. * topology.reconstruction_channels(slice.channel_count()) * n * relative_rate;
        if let Some(previous_rate) = previous_rate {
            // Free when the previous tier runs at the same rate.
            conditional += resample_ops(
                resample_kernel_length,
                previous_rate,
                rate,
                bank.reconstruction_dim(),
            )? * relative_rate;
            conditional += n * relative_rate;
        }
        ops += reconstruction_duty_cycle * conditional;
        previous_rate = Some(rate);
    }
    Ok(ops)
}
