use assert_approx_eq::assert_approx_eq;

use super::*;

fn extent(start: f64, end: f64) -> Extent {
    Extent { start, end }
}

#[test]
fn spanning_rounds_to_nearest_sample() {
    let slice = TimeSlice::spanning(512., extent(0.5, 4.5), 8).unwrap();
    assert_eq!(slice.kernel_length(), 2048);

    // 0.4 - 0.1 is not exactly 0.3 in floating point.
    let slice = TimeSlice::spanning(10., extent(0.1, 0.4), 1).unwrap();
    assert_eq!(slice.kernel_length(), 3);
}

#[test]
fn spanning_less_than_half_a_sample_is_rejected() {
    assert_eq!(
        TimeSlice::spanning(4., extent(0., 0.1), 1),
        Err(Error::ZeroKernelLength)
    );
}

#[test]
fn spanning_too_many_samples_is_rejected() {
    assert!(matches!(
        TimeSlice::spanning(1e9, extent(0., 1e4), 1),
        Err(Error::KernelLengthOutOfRange(_))
    ));
}

#[test]
fn slice_validation() {
    assert_eq!(
        TimeSlice::new(0., 1, 1, None),
        Err(Error::InvalidRate(0.))
    );
    assert!(matches!(
        TimeSlice::new(f64::NAN, 1, 1, None),
        Err(Error::InvalidRate(_))
    ));
    assert_eq!(
        TimeSlice::new(512., 0, 1, None),
        Err(Error::ZeroChannelCount)
    );
    assert_eq!(
        TimeSlice::new(512., 1, 0, None),
        Err(Error::ZeroKernelLength)
    );
    assert_eq!(
        TimeSlice::new(512., 1, 1, Some(extent(2., 1.))),
        Err(Error::InvalidExtent { start: 2., end: 1. })
    );
    assert_eq!(
        TimeSlice::new(512., 1, 1, Some(extent(1., 1.))),
        Err(Error::InvalidExtent { start: 1., end: 1. })
    );
}

#[test]
fn bank_requires_slices() {
    assert_eq!(TemplateBank::new(vec![], 4), Err(Error::EmptyBank));
}

#[test]
fn bank_requires_reconstruction_dim() {
    let slice = TimeSlice::new(512., 1, 1, None).unwrap();
    assert_eq!(
        TemplateBank::new(vec![slice], 0),
        Err(Error::ZeroReconstructionDim)
    );
}

#[test]
fn from_parallel_rejects_mismatched_lengths() {
    assert_eq!(
        TemplateBank::from_parallel(&[4, 4], &[50], &[512., 4096.], 4),
        Err(Error::MismatchedLengths {
            channel_counts: 2,
            kernel_lengths: 1,
            rates: 2,
        })
    );
    assert_eq!(
        TemplateBank::from_parallel(&[4, 4], &[50, 800], &[512.], 4),
        Err(Error::MismatchedLengths {
            channel_counts: 2,
            kernel_lengths: 2,
            rates: 1,
        })
    );
}

#[test]
fn from_parallel_validates_each_slice() {
    assert_eq!(
        TemplateBank::from_parallel(&[4, 0], &[50, 800], &[512., 4096.], 4),
        Err(Error::ZeroChannelCount)
    );
}

#[test]
fn from_parallel_keeps_order() {
    let bank = TemplateBank::from_parallel(&[3, 4], &[800, 50], &[4096., 512.], 7).unwrap();
    assert_eq!(bank.reconstruction_dim(), 7);
    assert_eq!(bank.max_rate(), 4096.);
    let rates = bank.slices().iter().map(TimeSlice::rate).collect::<Vec<_>>();
    assert_eq!(rates, vec![4096., 512.]);
    assert_approx_eq!(bank.relative_rate(&bank.slices()[1]), 0.125);
    assert_eq!(bank.extent(), None);
    assert_eq!(bank.earliest_end(), None);
}

#[test]
fn cascade_order_sorts_by_rate_then_channels_then_kernel() {
    let bank = TemplateBank::from_parallel(
        &[8, 2, 2, 5, 2],
        &[10, 30, 20, 40, 50],
        &[4096., 512., 512., 256., 4096.],
        8,
    )
    .unwrap();
    let order = bank
        .cascade_order()
        .map(|slice| (slice.rate(), slice.channel_count(), slice.kernel_length()))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            (256., 5, 40),
            (512., 2, 20),
            (512., 2, 30),
            (4096., 2, 50),
            (4096., 8, 10),
        ]
    );
}

#[test]
fn extents_of_a_bank() {
    let bank = TemplateBank::new(
        vec![
            TimeSlice::spanning(4096., extent(0., 0.5), 12).unwrap(),
            TimeSlice::spanning(512., extent(0.5, 4.5), 8).unwrap(),
            TimeSlice::spanning(128., extent(4.5, 36.5), 4).unwrap(),
        ],
        16,
    )
    .unwrap();
    assert_eq!(bank.extent(), Some(extent(0., 36.5)));
    assert_eq!(bank.earliest_end(), Some(0.5));
}

#[test]
fn extent_needs_every_slice() {
    let bank = TemplateBank::new(
        vec![
            TimeSlice::spanning(4096., extent(0., 0.5), 12).unwrap(),
            TimeSlice::new(512., 8, 2048, None).unwrap(),
        ],
        16,
    )
    .unwrap();
    assert_eq!(bank.extent(), None);
    assert_eq!(bank.earliest_end(), None);
}
