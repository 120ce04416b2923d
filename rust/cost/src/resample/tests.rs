use proptest::prelude::*;

use super::*;

#[test]
fn same_rate_is_free() {
    assert_eq!(resample_ops(192, 2048., 2048., 16), Ok(0.));
}

#[test]
fn decimation_scales_by_rate_ratio() {
    assert_eq!(
        resample_ops(64, 4096., 512., 1),
        Ok(td_conv_ops(64, 1).unwrap() * (512. / 4096.))
    );
    assert_eq!(resample_ops(64, 4096., 512., 1), Ok(16.));
}

#[test]
fn interpolation_costs_the_same_as_decimation() {
    assert_eq!(
        resample_ops(192, 256., 4096., 4),
        resample_ops(192, 4096., 256., 4)
    );
    assert_eq!(resample_ops(192, 256., 4096., 4), Ok(96.));
}

#[test]
fn rejects_non_positive_rates() {
    assert_eq!(resample_ops(64, 0., 512., 1), Err(Error::InvalidRate(0.)));
    assert_eq!(
        resample_ops(64, 4096., -512., 1),
        Err(Error::InvalidRate(-512.))
    );
    assert_eq!(
        resample_ops(64, f64::INFINITY, 512., 1),
        Err(Error::InvalidRate(f64::INFINITY))
    );
}

#[test]
fn rejects_empty_kernel_even_at_same_rate() {
    assert_eq!(
        resample_ops(0, 512., 512., 1),
        Err(Error::ZeroKernelLength)
    );
}

proptest! {
    #[test]
    #[cfg_attr(miri, ignore)]
    fn same_rate_is_always_free(
        kernel_length in 1u32..10_000,
        rate in 1e-3f64..1e6,
        channels in 0u32..1024,
    ) {
        prop_assert_eq!(resample_ops(kernel_length, rate, rate, channels).unwrap(), 0.);
    }
}

proptest! {
    #[test]
    #[cfg_attr(miri, ignore)]
    fn never_exceeds_full_rate_filter(
        kernel_length in 1u32..10_000,
        rate_in in 1f64..1e6,
        rate_out in 1f64..1e6,
        channels in 0u32..1024,
    ) {
        let ops = resample_ops(kernel_length, rate_in, rate_out, channels).unwrap();
        prop_assert!(ops >= 0.);
        prop_assert!(ops <= td_conv_ops(kernel_length, channels).unwrap());
    }
}
