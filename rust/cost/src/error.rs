use std::fmt;

/// Reasons a bank description or a cost model input was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The parallel channel count, kernel length and rate sequences had different lengths.
    MismatchedLengths {
        /// Number of channel counts supplied.
        channel_counts: usize,
        /// Number of kernel lengths supplied.
        kernel_lengths: usize,
        /// Number of rates supplied.
        rates: usize,
    },

    /// A bank must contain at least one time slice.
    EmptyBank,

    /// A convolution or resampling kernel had no taps.
    ZeroKernelLength,

    /// A time slice carried no basis channels.
    ZeroChannelCount,

    /// The bank's reconstruction dimension was zero.
    ZeroReconstructionDim,

    /// A sample rate was not a positive, finite number of hertz.
    InvalidRate(f64),

    /// A time slice's extent was not a finite interval with `start < end`.
    InvalidExtent {
        /// Start of the rejected extent, in seconds.
        start: f64,
        /// End of the rejected extent, in seconds.
        end: f64,
    },

    /// The number of samples spanned by a slice does not fit in a kernel length.
    KernelLengthOutOfRange(f64),

    /// FFT block lengths must be finite and strictly longer than the kernel.
    InvalidBlockLenFactor(f64),

    /// Duty cycles are fractions of samples, so must lie in `[0, 1]`.
    InvalidDutyCycle(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MismatchedLengths {
                channel_counts,
                kernel_lengths,
                rates,
            } => write!(
                f,
                "mismatched slice sequences: {channel_counts} channel counts, {kernel_lengths} kernel lengths, {rates} rates"
            ),
            Error::EmptyBank => write!(f, "template bank has no time slices"),
            Error::ZeroKernelLength => write!(f, "kernel length must be at least one sample"),
            Error::ZeroChannelCount => write!(f, "time slice must carry at least one channel"),
            Error::ZeroReconstructionDim => {
                write!(f, "reconstruction dimension must be at least one")
            }
            Error::InvalidRate(rate) => write!(f, "invalid sample rate {rate} Hz"),
            Error::InvalidExtent { start, end } => {
                write!(f, "invalid time slice extent ({start}, {end}) s")
            }
            Error::KernelLengthOutOfRange(samples) => {
                write!(f, "time slice spans {samples} samples, which is out of range")
            }
            Error::InvalidBlockLenFactor(factor) => {
                write!(f, "block length factor must be greater than 1, got {factor}")
            }
            Error::InvalidDutyCycle(duty_cycle) => {
                write!(f, "duty cycle must be between 0 and 1, got {duty_cycle}")
            }
        }
    }
}

impl std::error::Error for Error {}
