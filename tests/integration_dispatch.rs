//! Integration tests for command dispatch.
//!
//! These drive `dispatch` with constructed `RunConfig` values against images
//! written into temporary directories.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use image::{GrayImage, Luma, Rgb, RgbImage};
use perceptual_hash_cli::core::command::{dispatch, OutputFormat, RunConfig};
use perceptual_hash_cli::core::hasher::{HashAlgorithm, HasherConfig, ImageHash};
use perceptual_hash_cli::{HashParseError, ImageDecodeError, PhashError};
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn write_black_png(temp: &TempDir) -> PathBuf {
    let child = temp.child("black.png");
    RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])).save(child.path()).unwrap();
    child.path().to_path_buf()
}

fn write_split_png(temp: &TempDir, name: &str, bright_right: bool) -> PathBuf {
    let child = temp.child(name);
    GrayImage::from_fn(64, 64, |x, _| {
        if (x >= 32) == bright_right {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
    .save(child.path())
    .unwrap();
    child.path().to_path_buf()
}

fn run(config: &RunConfig) -> (Result<usize, PhashError>, String) {
    let mut out = Vec::new();
    let result = dispatch(config, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn hash_of(path: &Path) -> String {
    let (result, output) = run(&RunConfig::new(path).with_hash());
    assert_eq!(result.unwrap(), 1);
    output.trim_end().to_string()
}

#[test]
fn black_image_hashes_to_zero() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let (result, output) = run(&RunConfig::new(&image).with_hash());

    assert_eq!(result.unwrap(), 1);
    assert_eq!(output, "0000000000000000\n");
}

#[test]
fn black_image_compares_to_zero_distance() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let (result, output) = run(&RunConfig::new(&image).with_compare("0000000000000000"));

    assert_eq!(result.unwrap(), 1);
    assert_eq!(output, "0\n");
}

#[test]
fn invalid_hex_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let (result, output) = run(&RunConfig::new(&image).with_compare("ZZZZZZZZZZZZZZZZ"));

    assert!(matches!(
        result,
        Err(PhashError::Parse(HashParseError::InvalidCharacter { .. }))
    ));
    assert!(output.is_empty());
}

#[test]
fn missing_image_is_a_decode_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.child("missing.png");
    missing.assert(predicate::path::missing());

    let (result, output) = run(&RunConfig::new(missing.path()).with_hash());

    assert!(matches!(
        result,
        Err(PhashError::Decode(ImageDecodeError::NotFound { .. }))
    ));
    assert!(output.is_empty());
}

#[test]
fn corrupt_image_is_a_decode_error() {
    let temp = TempDir::new().unwrap();
    let corrupt = temp.child("corrupt.png");
    corrupt.write_binary(b"this is not a valid image file").unwrap();

    let (result, _) = run(&RunConfig::new(corrupt.path()).with_hash());

    assert!(matches!(result, Err(PhashError::Decode(_))));
}

#[test]
fn no_operation_succeeds_silently() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let (result, output) = run(&RunConfig::new(&image));

    assert_eq!(result.unwrap(), 0);
    assert!(output.is_empty());
}

#[test]
fn both_operations_print_hash_then_distance() {
    let temp = TempDir::new().unwrap();
    let image = write_split_png(&temp, "split.png", true);

    let config = RunConfig::new(&image)
        .with_hash()
        .with_compare("0000000000000000");
    let (result, output) = run(&config);

    assert_eq!(result.unwrap(), 2);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["0F0F0F0F0F0F0F0F", "32"]);
}

#[test]
fn hash_output_survives_later_compare_failure() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let config = RunConfig::new(&image).with_hash().with_compare("not-a-hash");
    let (result, output) = run(&config);

    assert!(matches!(result, Err(PhashError::Parse(_))));
    assert_eq!(output, "0000000000000000\n");
}

#[test]
fn hashing_is_deterministic_and_round_trips() {
    let temp = TempDir::new().unwrap();
    let image = write_split_png(&temp, "split.png", false);

    let first = hash_of(&image);
    let second = hash_of(&image);
    assert_eq!(first, second);

    let hasher = HasherConfig::new().build().unwrap();
    let computed = hasher.hash_file(&image).unwrap();
    let parsed: ImageHash = first.parse().unwrap();
    assert_eq!(parsed, computed);
}

#[test]
fn compare_is_case_insensitive_and_self_distance_is_zero() {
    let temp = TempDir::new().unwrap();
    let image = write_split_png(&temp, "split.png", true);
    let hash = hash_of(&image);

    let (result, output) = run(&RunConfig::new(&image).with_compare(hash.to_lowercase()));

    assert_eq!(result.unwrap(), 1);
    assert_eq!(output, "0\n");
}

#[test]
fn distance_is_symmetric_across_images() {
    let temp = TempDir::new().unwrap();
    let left_bright = write_split_png(&temp, "left.png", false);
    let right_bright = write_split_png(&temp, "right.png", true);

    let hash_a = hash_of(&left_bright);
    let hash_b = hash_of(&right_bright);

    let (_, a_vs_b) = run(&RunConfig::new(&right_bright).with_compare(hash_a));
    let (_, b_vs_a) = run(&RunConfig::new(&left_bright).with_compare(hash_b));

    assert_eq!(a_vs_b, b_vs_a);
    assert_eq!(a_vs_b, "64\n");
}

#[test]
fn json_output_is_one_object_per_line() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let config = RunConfig::new(&image)
        .with_hash()
        .with_compare("FFFFFFFFFFFFFFFF")
        .with_output(OutputFormat::Json);
    let (result, output) = run(&config);

    assert_eq!(result.unwrap(), 2);
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["operation"], "hash");
    assert_eq!(lines[0]["hash"], "0000000000000000");
    assert_eq!(lines[1]["operation"], "compare");
    assert_eq!(lines[1]["distance"], 64);
}

#[test]
fn larger_hash_size_renders_more_digits() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let (result, output) = run(&RunConfig::new(&image).with_hash().with_hash_size(16));

    assert_eq!(result.unwrap(), 1);
    assert!(predicate::str::is_match("^0{64}\n$").unwrap().eval(&output));

    // A 64-bit hash cannot be compared at size 16
    let (result, _) = run(
        &RunConfig::new(&image)
            .with_compare("0000000000000000")
            .with_hash_size(16),
    );
    assert!(matches!(
        result,
        Err(PhashError::Parse(HashParseError::InvalidLength { expected: 64, actual: 16 }))
    ));
}

#[test]
fn colour_image_uses_601_brightness_order() {
    let temp = TempDir::new().unwrap();
    let child = temp.child("red_green.png");
    RgbImage::from_fn(64, 64, |x, _| {
        if x < 32 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 110, 0])
        }
    })
    .save(child.path())
    .unwrap();

    // Red is the brighter half under ITU-R 601-2 weights
    assert_eq!(hash_of(child.path()), "F0F0F0F0F0F0F0F0");

    let (result, output) = run(&RunConfig::new(child.path()).with_compare("F0F0F0F0F0F0F0F0"));
    assert_eq!(result.unwrap(), 1);
    assert_eq!(output, "0\n");
}

#[test]
fn empty_compare_text_runs_nothing() {
    let temp = TempDir::new().unwrap();
    let image = write_black_png(&temp);

    let (result, output) = run(&RunConfig::new(&image).with_compare(""));

    assert_eq!(result.unwrap(), 0);
    assert!(output.is_empty());
}
