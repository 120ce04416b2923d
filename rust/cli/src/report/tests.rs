use assert_approx_eq::assert_approx_eq;
use flopbudget_cost::{Extent, TimeSlice};
use more_asserts::{assert_gt, assert_le};

use super::*;

fn slice(rate: f64, start: f64, end: f64, channel_count: u32) -> TimeSlice {
    TimeSlice::spanning(rate, Extent { start, end }, channel_count).unwrap()
}

fn inspiral_bank() -> TemplateBank {
    TemplateBank::new(
        vec![
            slice(4096., 0., 0.5, 12),
            slice(512., 0.5, 4.5, 8),
            slice(128., 4.5, 36.5, 4),
        ],
        16,
    )
    .unwrap()
}

fn ops_of(rows: &[Row], method: Method) -> f64 {
    rows.iter().find(|row| row.method == method).unwrap().ops
}

#[test]
fn rows_follow_method_order() {
    let rows = compare(&inspiral_bank(), Settings::default()).unwrap();
    let methods = rows.iter().map(|row| row.method).collect::<Vec<_>>();
    assert_eq!(methods, Method::ALL.to_vec());
}

#[test]
fn conventional_methods_filter_the_whole_template() {
    let rows = compare(&inspiral_bank(), Settings::default()).unwrap();
    // 36.5 s at 4096 Hz is 149504 taps, for each of 16 templates.
    assert_eq!(ops_of(&rows, Method::ConventionalFir), 2. * 149_504. * 16.);
    assert_eq!(
        ops_of(&rows, Method::ConventionalFft),
        fd_conv_ops(149_504, 2., 16).unwrap()
    );
}

#[test]
fn unsliced_methods_use_a_third_of_the_templates() {
    let rows = compare(&inspiral_bank(), Settings::default()).unwrap();
    let unsliced = TemplateBank::from_parallel(&[5], &[149_504], &[4096.], 16).unwrap();
    assert_approx_eq!(
        ops_of(&rows, Method::FirSvd),
        lloid_ops(
            &TimeDomain,
            &unsliced,
            &LloidOptions::default().with_duty_cycle(1.)
        )
        .unwrap()
    );
    assert_approx_eq!(
        ops_of(&rows, Method::FirLloidNoSlices),
        lloid_ops(&TimeDomain, &unsliced, &LloidOptions::default()).unwrap()
    );
}

#[test]
fn each_refinement_helps() {
    let rows = compare(&inspiral_bank(), Settings::default()).unwrap();
    let ops = |method| ops_of(&rows, method);
    assert_gt!(ops(Method::ConventionalFir), ops(Method::FirTimeSlices));
    assert_gt!(ops(Method::FirSvd), ops(Method::FirLloidNoSlices));
    assert_gt!(ops(Method::FirTimeSlicesSvd), ops(Method::FirLloid));
    assert_gt!(ops(Method::FftTimeSlicesSvd), ops(Method::FftLloid));
    assert_le!(ops(Method::FftLloidCascade), ops(Method::FftLloid));
    assert_le!(
        ops(Method::FftLloidCascadeHalvedRank),
        ops(Method::FftLloidCascade)
    );
}

#[test]
fn latencies() {
    let latencies = Latencies::of(&inspiral_bank()).unwrap();
    assert_approx_eq!(latencies.fir, 1. / 4096.);
    assert_approx_eq!(latencies.fft, 36.5);
    assert_approx_eq!(latencies.fft_slice, 0.5);

    assert_eq!(Method::FirLloid.latency(&latencies), latencies.fir);
    assert_eq!(Method::ConventionalFft.latency(&latencies), latencies.fft);
    assert_eq!(Method::FftSvd.latency(&latencies), latencies.fft);
    assert_eq!(Method::FftTimeSlices.latency(&latencies), latencies.fft_slice);
    assert_eq!(
        Method::FftLloidCascadeHalvedRank.latency(&latencies),
        latencies.fft_slice
    );
}

#[test]
fn banks_without_extents_have_no_latency() {
    let bank = TemplateBank::from_parallel(&[4, 4], &[50, 800], &[512., 4096.], 4).unwrap();
    assert!(matches!(
        compare(&bank, Settings::default()),
        Err(Error::MissingExtent)
    ));
}

#[test]
fn settings_are_validated() {
    let settings = Settings {
        block_len_factor: 1.,
        ..Default::default()
    };
    assert!(matches!(
        compare(&inspiral_bank(), settings),
        Err(Error::Bank(flopbudget_cost::Error::InvalidBlockLenFactor(_)))
    ));
}

#[test]
fn groups_thousands() {
    assert_eq!(group_thousands(0, " "), "0");
    assert_eq!(group_thousands(999, " "), "999");
    assert_eq!(group_thousands(1000, " "), "1 000");
    assert_eq!(group_thousands(1_234_567, ","), "1,234,567");
    assert_eq!(group_thousands(12_345_678, r"\,"), r"12\,345\,678");
}

#[test]
fn scientific_notation() {
    assert_eq!(latex_scientific(1. / 4096.), r"$2.4 \times 10^{-4}$");
    assert_eq!(latex_scientific(0.5), r"$5.0 \times 10^{-1}$");
    assert_eq!(latex_scientific(1200.), r"$1.2 \times 10^{3}$");
}

#[test]
fn latex_labels_use_small_caps() {
    assert_eq!(
        Method::FirLloid.latex_label(),
        r"\textsc{fir} method with \textsc{lloid}"
    );
    assert_eq!(
        Method::FftTimeSlicesSvd.latex_label(),
        r"\textsc{fft} method with time slices and \textsc{svd}"
    );
    assert_eq!(
        Method::FftLloidCascade.latex_label(),
        "same, with cascade topology"
    );
}

#[test]
fn latex_table() {
    let rows = compare(&inspiral_bank(), Settings::default()).unwrap();
    let table = render_latex(&rows);
    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4 + 14 + 2);
    assert_eq!(lines[0], r"\begin{tabular}{r c l}");
    assert_eq!(
        lines[4],
        r"       4 784 128 & $2.4 \times 10^{-4}$ & conventional \textsc{fir} method \\"
    );
    assert_eq!(lines[19], r"\end{tabular}");
}

#[test]
fn plain_table() {
    let rows = compare(&inspiral_bank(), Settings::default()).unwrap();
    let table = render_plain(&rows);
    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1 + 14);
    assert!(lines[0].contains("operations/sample"));
    assert!(lines[1].contains("4,784,128"));
    assert!(lines[1].ends_with("conventional FIR method"));
}
