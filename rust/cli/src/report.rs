//! Side-by-side operation counts and latencies for every way of filtering a bank.

use flopbudget_cost::{
    CASCADE_RESAMPLE_KERNEL_LENGTH, Convolution, DEFAULT_BLOCK_LEN_FACTOR,
    DEFAULT_RECONSTRUCTION_DUTY_CYCLE, DEFAULT_RESAMPLE_KERNEL_LENGTH, FrequencyDomain,
    LloidOptions, TemplateBank, TimeDomain, Topology, cascade_ops, fd_conv_ops, lloid_ops,
    td_conv_ops, time_sliced_conv_ops,
};
use num_traits::cast;

use crate::Error;

/// Ways of filtering a template bank, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Every template filtered directly at the maximum rate.
    ConventionalFir,
    /// Every template filtered with one FFT covering the whole template.
    ConventionalFft,
    /// FIR filtering of an SVD basis at the maximum rate, always reconstructing.
    FirSvd,
    /// FFT filtering of an SVD basis at the maximum rate, always reconstructing.
    FftSvd,
    /// FIR LLOID with a single time slice.
    FirLloidNoSlices,
    /// FFT LLOID with a single time slice.
    FftLloidNoSlices,
    /// FIR filtering of every template, time sliced.
    FirTimeSlices,
    /// FFT filtering of every template, time sliced.
    FftTimeSlices,
    /// Time-sliced FIR filtering of SVD bases, always reconstructing.
    FirTimeSlicesSvd,
    /// Time-sliced FFT filtering of SVD bases, always reconstructing.
    FftTimeSlicesSvd,
    /// FIR LLOID.
    FirLloid,
    /// FFT LLOID.
    FftLloid,
    /// FFT LLOID with chained rate tiers.
    FftLloidCascade,
    /// FFT LLOID with chained rate tiers and halved rank.
    FftLloidCascadeHalvedRank,
}

impl Method {
    /// Every method, in report order.
    pub const ALL: [Method; 14] = [
        Method::ConventionalFir,
        Method::ConventionalFft,
        Method::FirSvd,
        Method::FftSvd,
        Method::FirLloidNoSlices,
        Method::FftLloidNoSlices,
        Method::FirTimeSlices,
        Method::FftTimeSlices,
        Method::FirTimeSlicesSvd,
        Method::FftTimeSlicesSvd,
        Method::FirLloid,
        Method::FftLloid,
        Method::FftLloidCascade,
        Method::FftLloidCascadeHalvedRank,
    ];

    /// A plain-text description of the method.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Method::ConventionalFir => "conventional FIR method",
            Method::ConventionalFft => "conventional FFT method",
            Method::FirSvd => "FIR method with SVD",
            Method::FftSvd => "FFT method with SVD",
            Method::FirLloidNoSlices => "FIR method with LLOID and no time slices",
            Method::FftLloidNoSlices => "FFT method with LLOID and no time slices",
            Method::FirTimeSlices => "FIR method with time slices",
            Method::FftTimeSlices => "FFT method with time slices",
            Method::FirTimeSlicesSvd => "FIR method with time slices and SVD",
            Method::FftTimeSlicesSvd => "FFT method with time slices and SVD",
            Method::FirLloid => "FIR method with LLOID",
            Method::FftLloid => "FFT method with LLOID",
            Method::FftLloidCascade => "same, with cascade topology",
            Method::FftLloidCascadeHalvedRank => "same, with cascade topology 2",
        }
    }

    /// The description typeset for LaTeX, with acronyms in small caps.
    #[must_use]
    pub fn latex_label(self) -> String {
        ["FIR", "FFT", "SVD", "LLOID"]
            .into_iter()
            .fold(self.label().to_owned(), |label, acronym| {
                label.replace(
                    acronym,
                    &format!(r"\textsc{{{}}}", acronym.to_lowercase()),
                )
            })
    }

    fn is_fir(self) -> bool {
        matches!(
            self,
            Method::ConventionalFir
                | Method::FirSvd
                | Method::FirLloidNoSlices
                | Method::FirTimeSlices
                | Method::FirTimeSlicesSvd
                | Method::FirLloid
        )
    }

    fn is_time_sliced(self) -> bool {
        !matches!(
            self,
            Method::ConventionalFir
                | Method::ConventionalFft
                | Method::FirSvd
                | Method::FftSvd
                | Method::FirLloidNoSlices
                | Method::FftLloidNoSlices
        )
    }

    /// Seconds of delay the method adds before output is available.
    ///
    /// FIR filters only need one sample; FFT filters have to buffer up to the end of
    /// the longest kernel they transform at once.
    #[must_use]
    pub fn latency(self, latencies: &Latencies) -> f64 {
        if self.is_fir() {
            latencies.fir
        } else if self.is_time_sliced() {
            latencies.fft_slice
        } else {
            latencies.fft
        }
    }
}

/// Latencies of the three families of filter, in seconds.
///
/// A time-sliced FFT method can report a result once the first slice to finish
/// has filled its block, so its latency is the earliest slice end rather than
/// the longest slice duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latencies {
    /// One sample at the maximum rate.
    pub fir: f64,
    /// The end of the whole template.
    pub fft: f64,
    /// The end of the slice that ends first.
    pub fft_slice: f64,
}

impl Latencies {
    /// Latencies of filtering `bank`, taken from its maximum rate and slice extents.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingExtent`] if any slice in `bank` has no extent.
    pub fn of(bank: &TemplateBank) -> Result<Self, Error> {
        let extent = bank.extent().ok_or(Error::MissingExtent)?;
        let fft_slice = bank.earliest_end().ok_or(Error::MissingExtent)?;
        Ok(Self {
            fir: 1. / bank.max_rate(),
            fft: extent.end,
            fft_slice,
        })
    }
}

/// Model parameters used for every method in the comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// FFT block length as a multiple of the kernel length.
    pub block_len_factor: f64,
    /// Fraction of samples the LLOID models reconstruct on.
    pub reconstruction_duty_cycle: f64,
    /// Resampling filter length of the flat models.
    pub resample_kernel_length: u32,
    /// Resampling filter length of the cascade models.
    pub cascade_resample_kernel_length: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_len_factor: DEFAULT_BLOCK_LEN_FACTOR,
            reconstruction_duty_cycle: DEFAULT_RECONSTRUCTION_DUTY_CYCLE,
            resample_kernel_length: DEFAULT_RESAMPLE_KERNEL_LENGTH,
            cascade_resample_kernel_length: CASCADE_RESAMPLE_KERNEL_LENGTH,
        }
    }
}

/// One line of the comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Which method this row describes.
    pub method: Method,
    /// Operations per output sample.
    pub ops: f64,
    /// Latency in seconds.
    pub latency: f64,
}

/// Everything the methods are evaluated against.
struct Context<'a> {
    bank: &'a TemplateBank,

    /// The whole template as a single slice at the maximum rate, with a third of the
    /// reconstruction dimension as its basis.
    unsliced: TemplateBank,

    /// Length of the whole template at the maximum rate.
    raw_kernel_length: u32,

    settings: Settings,
}

impl<'a> Context<'a> {
    fn new(bank: &'a TemplateBank, settings: Settings) -> Result<Self, Error> {
        let extent = bank.extent().ok_or(Error::MissingExtent)?;
        let samples = (extent.duration() * bank.max_rate()).round();
        let raw_kernel_length = cast::<f64, u32>(samples)
            .ok_or(flopbudget_cost::Error::KernelLengthOutOfRange(samples))?;
        let n = bank.reconstruction_dim();
        let unsliced = TemplateBank::from_parallel(
            &[(n / 3).max(1)],
            &[raw_kernel_length],
            &[bank.max_rate()],
            n,
        )?;
        Ok(Self {
            bank,
            unsliced,
            raw_kernel_length,
            settings,
        })
    }

    fn flat(&self) -> LloidOptions {
        LloidOptions {
            resample_kernel_length: self.settings.resample_kernel_length,
            reconstruction_duty_cycle: self.settings.reconstruction_duty_cycle,
        }
    }

    fn cascade(&self) -> LloidOptions {
        LloidOptions {
            resample_kernel_length: self.settings.cascade_resample_kernel_length,
            reconstruction_duty_cycle: self.settings.reconstruction_duty_cycle,
        }
    }

    fn ops(&self, method: Method) -> Result<f64, flopbudget_cost::Error> {
        let fd = FrequencyDomain {
            block_len_factor: self.settings.block_len_factor,
        };
        let n = self.bank.reconstruction_dim();
        let always = self.flat().with_duty_cycle(1.);
        match method {
            Method::ConventionalFir => td_conv_ops(self.raw_kernel_length, n),
            Method::ConventionalFft => {
                fd_conv_ops(self.raw_kernel_length, self.settings.block_len_factor, n)
            }
            Method::FirSvd => lloid_ops(&TimeDomain, &self.unsliced, &always),
            Method::FftSvd => lloid_ops(&fd, &self.unsliced, &always),
            Method::FirLloidNoSlices => lloid_ops(&TimeDomain, &self.unsliced, &self.flat()),
            Method::FftLloidNoSlices => lloid_ops(&fd, &self.unsliced, &self.flat()),
            Method::FirTimeSlices => self.time_sliced(&TimeDomain),
            Method::FftTimeSlices => self.time_sliced(&fd),
            Method::FirTimeSlicesSvd => lloid_ops(&TimeDomain, self.bank, &always),
            Method::FftTimeSlicesSvd => lloid_ops(&fd, self.bank, &always),
            Method::FirLloid => lloid_ops(&TimeDomain, self.bank, &self.flat()),
            Method::FftLloid => lloid_ops(&fd, self.bank, &self.flat()),
            Method::FftLloidCascade => {
                cascade_ops(&fd, self.bank, Topology::Chained, &self.cascade())
            }
            Method::FftLloidCascadeHalvedRank => {
                cascade_ops(&fd, self.bank, Topology::HalvedRank, &self.cascade())
            }
        }
    }

    fn time_sliced<C: Convolution>(&self, conv: &C) -> Result<f64, flopbudget_cost::Error> {
        time_sliced_conv_ops(
            conv,
            self.bank,
            self.settings.resample_kernel_length,
            self.bank.reconstruction_dim(),
        )
    }
}

/// Evaluates every [`Method`] against `bank`.
///
/// # Errors
///
/// - [`Error::MissingExtent`] if any slice in `bank` has no extent.
/// - [`Error::Bank`] if `settings` are out of range or the template is too long.
pub fn compare(bank: &TemplateBank, settings: Settings) -> Result<Vec<Row>, Error> {
    let latencies = Latencies::of(bank)?;
    let context = Context::new(bank, settings)?;
    Method::ALL
        .into_iter()
        .map(|method| -> Result<Row, Error> {
            Ok(Row {
                method,
                ops: context.ops(method)?,
                latency: method.latency(&latencies),
            })
        })
        .collect()
}

/// Formats a whole number with `separator` between groups of three digits.
#[must_use]
pub fn group_thousands(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

fn format_ops(ops: f64, separator: &str) -> String {
    match cast::<f64, u64>(ops.round()) {
        Some(ops) => group_thousands(ops, separator),
        None => format!("{ops}"),
    }
}

/// Formats `x` to two significant figures as `$m \times 10^{e}$`.
#[must_use]
pub fn latex_scientific(x: f64) -> String {
    let formatted = format!("{x:.1e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!(r"${mantissa} \times 10^{{{exponent}}}$"),
        None => format!("${formatted}$"),
    }
}

/// Renders the comparison as a LaTeX `tabular`.
#[must_use]
pub fn render_latex(rows: &[Row]) -> String {
    let mut out = String::new();
    out.push_str("\\begin{tabular}{r c l}\n");
    out.push_str("\\hline\\hline\n");
    out.push_str("operations/sample & latency (s.) & method \\\\\n");
    out.push_str("\\hline\n");
    for row in rows {
        out.push_str(&format!(
            "{:>16} & {} & {} \\\\\n",
            format_ops(row.ops, " "),
            latex_scientific(row.latency),
            row.method.latex_label()
        ));
    }
    out.push_str("\\hline\n");
    out.push_str("\\end{tabular}\n");
    out
}

/// Renders the comparison as an aligned plain-text table.
#[must_use]
pub fn render_plain(rows: &[Row]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>20}  {:>11}  method\n",
        "operations/sample", "latency (s)"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:>20}  {:>11.1e}  {}\n",
            format_ops(row.ops, ","),
            row.latency,
            row.method.label()
        ));
    }
    out
}

#[cfg(test)]
mod tests;
