//! Single-pass segmentation regression tests
//!
//! End-to-end cuts on small synthetic scenes with known structure: a
//! constant image (pure smoothness + hard constraints), a vertical depth
//! step (regional + depth dissimilarity), and input-transformation
//! invariances.

use lidarseg_core::Coord;
use lidarseg_cut::{CutError, Difference, SegmentationParams, SegmentationSession, segment};
use lidarseg_test::{constant_image, depth_step_image};

fn step_params() -> SegmentationParams {
    SegmentationParams::new()
        .with_lambda(1.0)
        .with_bins(10)
        .with_difference(Difference::Depth)
}

#[test]
fn constant_image_honors_hard_constraints() {
    let image = constant_image(10, 10, 0.5);
    let mut session = SegmentationSession::new(image);
    session.seeds_mut().add_sources([Coord::new(0, 0)]);
    session.seeds_mut().add_sinks([Coord::new(9, 9)]);

    let params = SegmentationParams::new()
        .with_lambda(0.1)
        .with_bins(4)
        .with_difference(Difference::Weighted([1.0; 4]));
    let result = session.segment(&params).unwrap();

    // mask dimensions match the image
    assert_eq!(result.mask.dimensions(), (10, 10));
    // seeds keep their labels no matter what the rest of the image does
    assert!(result.mask.is_foreground(0, 0));
    assert!(!result.mask.is_foreground(9, 9));
    // both labels are populated
    let foreground = result.mask.count_foreground();
    assert!(foreground >= 1 && foreground <= 99, "foreground {foreground}");

    // identical input, identical output
    let again = session.segment(&params).unwrap();
    assert_eq!(again.mask, result.mask);
    assert_eq!(again.flow, result.flow);
}

#[test]
fn vertical_depth_step_splits_exactly() {
    let image = depth_step_image(20, 20, 10, 0.2, 0.8);
    let mask = segment(
        &image,
        &[Coord::new(2, 10)],
        &[Coord::new(17, 10)],
        &step_params(),
    )
    .unwrap();

    for y in 0..20 {
        for x in 0..20 {
            let expected = x < 10;
            assert_eq!(
                mask.is_foreground(x, y),
                expected,
                "pixel ({x}, {y}) on the wrong side"
            );
        }
    }
}

#[test]
fn doubling_lambda_keeps_a_perfect_fit() {
    // ground truth is a perfect histogram fit: raising the regional weight
    // cannot move the boundary
    let image = depth_step_image(20, 20, 10, 0.2, 0.8);
    let sources = [Coord::new(2, 10)];
    let sinks = [Coord::new(17, 10)];

    let base = segment(&image, &sources, &sinks, &step_params()).unwrap();
    let doubled = segment(&image, &sources, &sinks, &step_params().with_lambda(2.0)).unwrap();
    assert_eq!(base, doubled);
}

#[test]
fn affine_channel_rescale_leaves_mask_unchanged() {
    // scaling and shifting raw channel values is absorbed by the min-max
    // normalization, so the cut cannot change
    let reference = depth_step_image(20, 20, 10, 0.2, 0.8);
    let rescaled = depth_step_image(20, 20, 10, 12.0, 72.0);
    let sources = [Coord::new(2, 10)];
    let sinks = [Coord::new(17, 10)];

    let a = segment(&reference, &sources, &sinks, &step_params()).unwrap();
    let b = segment(&rescaled, &sources, &sinks, &step_params()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_sinks_fill_foreground_on_constant_image() {
    // with no background evidence and nothing to cut cheaply, everything
    // joins the seeded label
    let image = constant_image(10, 10, 0.5);
    let params = SegmentationParams::new()
        .with_lambda(0.1)
        .with_bins(4)
        .with_difference(Difference::Weighted([1.0; 4]));

    let mask = segment(&image, &[Coord::new(0, 0)], &[], &params).unwrap();
    assert_eq!(mask.count_foreground(), 100);

    let mask = segment(&image, &[], &[Coord::new(9, 9)], &params).unwrap();
    assert_eq!(mask.count_foreground(), 0);
}

#[test]
fn empty_sinks_still_find_the_depth_step() {
    // a lone foreground seed: the foreground model plus the cheap cut
    // along the step is enough
    let image = depth_step_image(20, 20, 10, 0.2, 0.8);
    let mask = segment(&image, &[Coord::new(2, 10)], &[], &step_params()).unwrap();
    for x in 0..20 {
        assert_eq!(mask.is_foreground(x, 10), x < 10, "pixel ({x}, 10)");
    }
}

#[test]
fn no_seeds_is_an_error() {
    let image = constant_image(5, 5, 0.5);
    let err = segment(&image, &[], &[], &SegmentationParams::default()).unwrap_err();
    assert!(matches!(err, CutError::NoSeeds));
}
