//! Time-sliced template bank descriptions.
//!
//! A template waveform is partitioned in time, and each piece is filtered at the
//! lowest sample rate that still captures it. The cost models only need the shape
//! of that partition, which is what these types carry.

use std::cmp::Ordering;

use itertools::Itertools;
use num_traits::cast;

use crate::{Error, conv::check_kernel_length, resample::check_rate};

/// The interval a time slice covers, in seconds relative to the reference event time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Start of the interval, in seconds.
    pub start: f64,

    /// End of the interval, in seconds. Must be greater than `start`.
    pub end: f64,
}

impl Extent {
    /// Length of the interval in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    fn check(self) -> Result<Self, Error> {
        if self.start.is_finite() && self.end.is_finite() && self.start < self.end {
            Ok(self)
        } else {
            Err(Error::InvalidExtent {
                start: self.start,
                end: self.end,
            })
        }
    }
}

/// One segment of a partitioned template waveform, evaluated at a fixed sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlice {
    rate: f64,
    channel_count: u32,
    kernel_length: u32,
    extent: Option<Extent>,
}

impl TimeSlice {
    /// Creates a slice with an explicit kernel length.
    ///
    /// `extent` is optional since the cost models never look at it, but latency
    /// figures can only be derived for banks whose slices all have one.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRate`] if `rate` is not positive and finite.
    /// - [`Error::ZeroChannelCount`] if `channel_count` is zero.
    /// - [`Error::ZeroKernelLength`] if `kernel_length` is zero.
    /// - [`Error::InvalidExtent`] if `extent` is not a finite, non-empty interval.
    pub fn new(
        rate: f64,
        channel_count: u32,
        kernel_length: u32,
        extent: Option<Extent>,
    ) -> Result<Self, Error> {
        check_rate(rate)?;
        if channel_count == 0 {
            return Err(Error::ZeroChannelCount);
        }
        check_kernel_length(kernel_length)?;
        Ok(Self {
            rate,
            channel_count,
            kernel_length,
            extent: extent.map(Extent::check).transpose()?,
        })
    }

    /// Creates a slice whose kernel covers `extent` exactly, i.e. has
    /// `round(rate * (end - start))` taps.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`TimeSlice::new`], and additionally with
    /// [`Error::KernelLengthOutOfRange`] if the extent spans too many samples.
    pub fn spanning(rate: f64, extent: Extent, channel_count: u32) -> Result<Self, Error> {
        check_rate(rate)?;
        let samples = (rate * extent.check()?.duration()).round();
        let kernel_length =
            cast::<f64, u32>(samples).ok_or(Error::KernelLengthOutOfRange(samples))?;
        Self::new(rate, channel_count, kernel_length, Some(extent))
    }

    /// Sample rate in Hz.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Number of orthogonal basis channels after rank reduction.
    #[must_use]
    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    /// Number of taps in this slice's kernel.
    #[must_use]
    pub fn kernel_length(&self) -> u32 {
        self.kernel_length
    }

    /// The interval this slice covers, if known.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    /// Order in which cascade topologies visit slices: ascending rate, then channel
    /// count, then kernel length.
    #[must_use]
    pub fn cascade_cmp(&self, other: &Self) -> Ordering {
        self.rate
            .total_cmp(&other.rate)
            .then(self.channel_count.cmp(&other.channel_count))
            .then(self.kernel_length.cmp(&other.kernel_length))
    }
}

/// An ordered, nonempty collection of time slices sharing one reconstruction dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateBank {
    slices: Vec<TimeSlice>,
    reconstruction_dim: u32,
    max_rate: f64,
}

impl TemplateBank {
    /// Collects `slices` into a bank whose templates are reconstructed from
    /// `reconstruction_dim` basis filters.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyBank`] if `slices` is empty.
    /// - [`Error::ZeroReconstructionDim`] if `reconstruction_dim` is zero.
    pub fn new(slices: Vec<TimeSlice>, reconstruction_dim: u32) -> Result<Self, Error> {
        if reconstruction_dim == 0 {
            return Err(Error::ZeroReconstructionDim);
        }
        let max_rate = slices
            .iter()
            .map(TimeSlice::rate)
            .reduce(f64::max)
            .ok_or(Error::EmptyBank)?;
        Ok(Self {
            slices,
            reconstruction_dim,
            max_rate,
        })
    }

    /// Builds a bank from parallel sequences of channel counts (`L`), kernel lengths
    /// (`M`) and rates, with reconstruction dimension `N`. Slices built this way have
    /// no extent.
    ///
    /// # Errors
    ///
    /// - [`Error::MismatchedLengths`] if the three sequences differ in length.
    /// - Any error from [`TimeSlice::new`] or [`TemplateBank::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use flopbudget_cost::TemplateBank;
    /// let bank = TemplateBank::from_parallel(&[4, 4], &[50, 800], &[512., 4096.], 4).unwrap();
    /// assert_eq!(bank.max_rate(), 4096.);
    /// assert!(TemplateBank::from_parallel(&[4], &[50, 800], &[512., 4096.], 4).is_err());
    /// ```
    pub fn from_parallel(
        channel_counts: &[u32],
        kernel_lengths: &[u32],
        rates: &[f64],
        reconstruction_dim: u32,
    ) -> Result<Self, Error> {
        if channel_counts.len() != kernel_lengths.len() || kernel_lengths.len() != rates.len() {
            return Err(Error::MismatchedLengths {
                channel_counts: channel_counts.len(),
                kernel_lengths: kernel_lengths.len(),
                rates: rates.len(),
            });
        }
        let slices = itertools::izip!(channel_counts, kernel_lengths, rates)
            .map(|(&channel_count, &kernel_length, &rate)| {
                TimeSlice::new(rate, channel_count, kernel_length, None)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(slices, reconstruction_dim)
    }

    /// The slices, in the order they were given.
    #[must_use]
    pub fn slices(&self) -> &[TimeSlice] {
        &self.slices
    }

    /// Dimension of the full waveform space the channels are projected back into.
    #[must_use]
    pub fn reconstruction_dim(&self) -> u32 {
        self.reconstruction_dim
    }

    /// The rate at which composite output is produced.
    #[must_use]
    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }

    /// Fraction of output samples that `slice` produces a sample for.
    #[must_use]
    pub fn relative_rate(&self, slice: &TimeSlice) -> f64 {
        slice.rate / self.max_rate
    }

    /// The slices in cascade order, see [`TimeSlice::cascade_cmp`].
    pub fn cascade_order(&self) -> impl Iterator<Item = &TimeSlice> {
        self.slices.iter().sorted_by(|a, b| a.cascade_cmp(b))
    }

    /// The interval covered by the whole bank, if every slice has an extent.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        let extents = self
            .slices
            .iter()
            .map(TimeSlice::extent)
            .collect::<Option<Vec<_>>>()?;
        extents.into_iter().reduce(|a, b| Extent {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        })
    }

    /// The earliest end of any slice, if every slice has an extent.
    ///
    /// This is how far back from the event time the latest-ending slice reaches,
    /// i.e. the minimum buffering a time-sliced FFT filter needs.
    #[must_use]
    pub fn earliest_end(&self) -> Option<f64> {
        self.slices
            .iter()
            .map(|slice| slice.extent.map(|extent| extent.end))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .reduce(f64::min)
    }
}

#[cfg(test)]
mod tests;
