use approx::assert_abs_diff_eq;
use hound::{SampleFormat, WavSpec, WavWriter};
use monomix::{
    AudioError, ChannelRole, MemoryTrackFactory, StereoToMono, Track, export_mono_wav,
    load_stereo_pair,
};
use std::path::PathBuf;

fn temp_wav(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("monomix_{name}.wav"))
}

fn write_stereo_fixture(path: &PathBuf, rate: u32, frames: &[(f32, f32)]) {
    let spec = WavSpec {
        channels: 2,
        sample_rate: rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for (l, r) in frames {
        writer.write_sample(*l).unwrap();
        writer.write_sample(*r).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_load_stereo_pair() {
    let path = temp_wav("load_pair");
    write_stereo_fixture(&path, 44100, &[(0.1, 0.4), (0.2, 0.5), (0.3, 0.6)]);

    let (left, right) = load_stereo_pair(&path).unwrap();

    assert_eq!(left.rate(), 44100);
    assert_eq!(left.samples(), &[0.1, 0.2, 0.3]);
    assert_eq!(right.samples(), &[0.4, 0.5, 0.6]);
    assert!(left.selected());
    assert!(left.linked());
    assert_eq!(left.channel(), ChannelRole::Left);
    assert!(!right.linked());
    assert_eq!(right.channel(), ChannelRole::Right);
}

#[test]
fn test_load_rejects_mono_file() {
    let path = temp_wav("load_mono");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    writer.write_sample(0.5f32).unwrap();
    writer.finalize().unwrap();

    let result = load_stereo_pair(&path);
    assert!(matches!(result, Err(AudioError::UnsupportedFormat)));
}

#[test]
fn test_load_missing_file() {
    let result = load_stereo_pair(temp_wav("does_not_exist"));
    assert!(matches!(result, Err(AudioError::OpenError(_))));
}

#[test]
fn test_load_mix_export_round_trip() {
    let input = temp_wav("pipeline_in");
    let output = temp_wav("pipeline_out");
    write_stereo_fixture(&input, 8000, &[(1.0, 0.0), (1.0, 0.0), (-1.0, 0.0), (-1.0, 0.0)]);

    let (left, right) = load_stereo_pair(&input).unwrap();
    let mut tracks = vec![left, right];
    StereoToMono
        .process(&mut tracks, &MemoryTrackFactory, &mut |_, _| false)
        .unwrap();
    assert_eq!(tracks.len(), 1);

    export_mono_wav(&output, &tracks[0]).unwrap();

    let mut reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 8000);
    let written: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    let expected = [0.5, 0.5, -0.5, -0.5];
    assert_eq!(written.len(), expected.len());
    for (got, want) in written.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-6);
    }
}
