use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lsb_detector::analysis::chi_square::chi_square_test;
use lsb_detector::common::image_io::{FsImageStore, ImageProvider, ImageWriter};
use lsb_detector::processing::bitstream::{decode, encode};
use lsb_detector::processing::steganography::{embed_bits, embed_text_in_image, extract_bits};
use lsb_detector::{Channel, DetectionStatus, LsbDetector, PixelChannel, StegoError};

fn random_rgb(seed: u64, width: u32, height: u32) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]))
}

#[test]
fn test_hello_in_mid_gray_is_detected() {
    let cover = PixelChannel::filled(200, 200, 128).unwrap();
    let stego = embed_bits(&cover, &encode("HELLO").unwrap()).unwrap();

    let verdict = LsbDetector::new().analyze(&stego);
    assert_eq!(verdict.message.as_deref(), Some("HELLO"));
    assert_eq!(verdict.status, DetectionStatus::SteganographyDetected);
    assert!((0.0..=1.0).contains(&verdict.score));
}

#[test]
fn test_random_images_are_mostly_normal() {
    let detector = LsbDetector::new();
    let mut normal = 0;
    for seed in 0..10 {
        let image = random_rgb(seed, 200, 200);
        let verdict = detector.analyze_image(&image, Channel::Red).unwrap();
        assert!(verdict.message.is_none(), "seed {} decoded a message", seed);
        // Entropy and correlation always fire on noise; chi-square rarely does
        assert!(verdict.lsb_plane.entropy > 0.99);
        assert!(verdict.correlation.average_magnitude() < 0.8);
        if verdict.score <= 0.4 {
            assert_eq!(verdict.status, DetectionStatus::Normal);
            normal += 1;
        }
    }
    assert!(normal >= 8, "only {} of 10 random images were normal", normal);
}

#[test]
fn test_all_even_channel_statistics() {
    let channel = PixelChannel::filled(64, 48, 100).unwrap();
    let verdict = LsbDetector::new().analyze(&channel);

    assert!(verdict.message.is_none());
    assert_eq!(verdict.lsb_plane.mean, 0.0);
    assert_eq!(verdict.lsb_plane.entropy, 0.0);
    assert_eq!(verdict.lsb_plane.runs_test.runs, 1);
    assert!(verdict.lsb_plane.runs_test.z_score.is_none());
    assert_eq!(verdict.lsb_plane.runs_test.p_value, 1.0);
    assert_eq!(verdict.correlation.horizontal, 0.0);
    assert_eq!(verdict.correlation.vertical, 0.0);
}

#[test]
fn test_round_trip_for_many_messages() {
    let mut rng = StdRng::seed_from_u64(99);
    for len in [0usize, 1, 7, 40, 300] {
        let message: String = (0..len)
            .map(|_| char::from(rng.gen_range(32u8..=126)))
            .collect();
        let data: Vec<u8> = (0..120 * 90).map(|_| rng.gen()).collect();
        let channel = PixelChannel::new(120, 90, data).unwrap();

        let stego = embed_bits(&channel, &encode(&message).unwrap()).unwrap();
        let decoded = decode(extract_bits(&stego).as_slice());
        // A random message may itself contain "END"; decoding stops there
        let expected = match message.find("END") {
            Some(idx) => message[..idx].to_string(),
            None => message.clone(),
        };
        assert_eq!(decoded, Some(expected));
    }
}

#[test]
fn test_capacity_boundary_on_image() {
    let image = random_rgb(5, 10, 10);
    // 100 pixels: 9 characters + "END" = 96 bits fits, 10 characters = 104 bits does not
    assert!(embed_text_in_image(&image, Channel::Red, "123456789").is_ok());
    let err = embed_text_in_image(&image, Channel::Red, "1234567890").unwrap_err();
    assert!(matches!(
        err,
        StegoError::CapacityExceeded {
            required: 104,
            available: 100
        }
    ));
}

#[test]
fn test_non_printable_message_is_rejected_before_embedding() {
    let image = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
    let err = embed_text_in_image(&image, Channel::Red, "line\nbreak").unwrap_err();
    assert!(matches!(
        err,
        StegoError::Encoding {
            character: '\n',
            position: 4
        }
    ));
}

#[test]
fn test_chi_square_rejection_rate_on_uniform_noise() {
    let trials = 200;
    let mut rejections = 0;
    for seed in 0..trials {
        let mut rng = StdRng::seed_from_u64(1_000 + seed);
        let samples: Vec<u8> = (0..64 * 64).map(|_| rng.gen()).collect();
        if chi_square_test(&samples).p_value < 0.01 {
            rejections += 1;
        }
    }
    // Expected rate is 1%; allow generous slack
    assert!(rejections <= 10, "{} of {} trials rejected", rejections, trials);
}

#[test]
fn test_file_round_trip_through_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stego.png");
    let cover = random_rgb(21, 80, 60);

    let stego = embed_text_in_image(&cover, Channel::Blue, "over the wire").unwrap();
    FsImageStore.save_rgb(&stego, &path).unwrap();

    let loaded = FsImageStore.load_rgb(&path).unwrap();
    let verdict = LsbDetector::new()
        .analyze_image(&loaded, Channel::Blue)
        .unwrap();
    assert_eq!(verdict.message.as_deref(), Some("over the wire"));

    // The red channel was never written to
    let red = FsImageStore.load_channel(&path, Channel::Red).unwrap();
    assert_eq!(red, PixelChannel::from_rgb(&cover, Channel::Red).unwrap());
}
