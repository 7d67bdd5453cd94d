// Unit tests for business rules

use std::path::Path;

use super::*;
use crate::domain::errors::DomainError;

fn scene(start: &str, end: &str) -> Scene {
    SceneEntry::new(start, end).validate().unwrap()
}

fn arg_after<'a>(args: &'a [String], flag: &str) -> &'a str {
    let pos = args.iter().position(|a| a == flag).unwrap();
    &args[pos + 1]
}

#[test]
fn test_clip_portrait_crop() {
    let builder = TranscodeOperationBuilder::default();
    let op = builder
        .clip(
            &scene("00:00:10:000", "00:00:15:500"),
            &SourceDescriptor::local("in.mp4"),
            &ModeSelection::new(ModeKind::PortraitCrop, None),
            Path::new("output/manual_cut_001.mp4"),
        )
        .unwrap();

    let args = op.to_args();
    assert_eq!(arg_after(&args, "-ss"), "00:00:10.000");
    assert_eq!(arg_after(&args, "-t"), "5.500");
    assert_eq!(
        arg_after(&args, "-vf"),
        "crop=in_h*9/16:in_h:(in_w-in_h*9/16)/2:0,scale=1080:1920"
    );
    assert!(!args.contains(&"-reconnect".to_string()));
    assert!(!args.contains(&"-filter_complex".to_string()));
}

#[test]
fn test_clip_is_deterministic() {
    let builder = TranscodeOperationBuilder::default();
    let s = scene("00:00:01:000", "00:00:02:000");
    let source = SourceDescriptor::remote("https://cdn.example.com/a.mp4");
    let mode = ModeSelection::new(ModeKind::StreamerStack, None);
    let out = Path::new("o.mp4");
    assert_eq!(
        builder.clip(&s, &source, &mode, out).unwrap(),
        builder.clip(&s, &source, &mode, out).unwrap()
    );
}

#[test]
fn test_remote_reconnect_precedes_input() {
    let builder = TranscodeOperationBuilder::default();
    let op = builder
        .clip(
            &scene("00:00:01:000", "00:00:02:000"),
            &SourceDescriptor::remote("https://cdn.example.com/a.mp4"),
            &ModeSelection::new(ModeKind::PortraitCrop, None),
            Path::new("o.mp4"),
        )
        .unwrap();

    let args = op.to_args();
    let reconnect = args.iter().position(|a| a == "-reconnect").unwrap();
    let input = args.iter().position(|a| a == "-i").unwrap();
    assert!(reconnect < input);
    assert_eq!(arg_after(&args, "-reconnect_delay_max"), "5");
}

#[test]
fn test_filter_graphs_per_mode() {
    let stack = filter_for_mode(&OutputMode::StreamerStack).unwrap();
    assert!(stack.graph().starts_with("[0:v]scale=1920:1080[scaled];"));
    assert!(stack.graph().ends_with("vstack=inputs=2[out]"));

    let restack = filter_for_mode(&OutputMode::SideBySideRestack).unwrap();
    assert_eq!(
        restack,
        FilterSpec::Complex {
            graph: "[0:v]crop=iw/2:ih:0:0[left];[0:v]crop=iw/2:ih:iw/2:0[right];[left][right]vstack,scale=1080:1920[out]".to_string(),
            maps: vec!["[out]".to_string(), "0:a?".to_string()],
        }
    );

    let black = filter_for_mode(&OutputMode::Letterbox(Background::Black)).unwrap();
    assert!(black
        .graph()
        .starts_with("color=c=black:s=1080x1920:d=999[bg];[0:v]scale=1080:800[fg];"));
    let white = filter_for_mode(&OutputMode::Letterbox(Background::White)).unwrap();
    assert!(white.graph().starts_with("color=c=white:"));
    assert!(!white.graph().contains("black"));
    let blur = filter_for_mode(&OutputMode::Letterbox(Background::Blur)).unwrap();
    assert!(blur.graph().contains("boxblur=30:30[bg]"));

    assert!(filter_for_mode(&OutputMode::MergeVertical).is_err());
    assert!(filter_for_mode(&OutputMode::Overlay).is_err());
}

#[test]
fn test_clip_rejects_unknown_background() {
    let builder = TranscodeOperationBuilder::default();
    let err = builder
        .clip(
            &scene("00:00:01:000", "00:00:02:000"),
            &SourceDescriptor::local("in.mp4"),
            &ModeSelection::new(ModeKind::Letterbox, Some("purple".into())),
            Path::new("o.mp4"),
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::Configuration(_)));
}

#[test]
fn test_auto_intermediate_b_drops_audio() {
    let builder = TranscodeOperationBuilder::default();
    let op = builder
        .merge_intermediate(
            Timestamp::from_millis(12_000),
            3_000,
            &SourceDescriptor::local("b.mp4"),
            MergeStrategy::Automatic,
            false,
            Path::new("tmp_b_002.mp4"),
        )
        .unwrap();

    let args = op.to_args();
    assert_eq!(arg_after(&args, "-vf"), "scale=1080:960,setsar=1");
    assert!(args.contains(&"-an".to_string()));
    assert!(!args.contains(&"-c:a".to_string()));
    assert_eq!(arg_after(&args, "-ss"), "00:00:12.000");
    assert_eq!(arg_after(&args, "-t"), "3.000");
}

#[test]
fn test_manual_intermediate_and_composite() {
    let builder = TranscodeOperationBuilder::default();
    let inter = builder
        .merge_intermediate(
            Timestamp::ZERO,
            1_000,
            &SourceDescriptor::local("a.mp4"),
            MergeStrategy::Manual,
            true,
            Path::new("tmp_a_001.mp4"),
        )
        .unwrap();
    assert_eq!(arg_after(&inter.to_args(), "-vf"), "scale=1080:960");

    let composite = builder.merge_composite(
        Path::new("tmp_a_001.mp4"),
        Path::new("tmp_b_001.mp4"),
        MergeStrategy::Manual,
        Path::new("merged_001.mp4"),
    );
    let args = composite.to_args();
    assert_eq!(composite.inputs()[0].location(), "tmp_a_001.mp4");
    assert_eq!(arg_after(&args, "-c:a"), "aac");
    assert!(arg_after(&args, "-filter_complex").contains("[up][down]vstack=inputs=2[out]"));
}

#[test]
fn test_auto_composite_copies_audio() {
    let builder = TranscodeOperationBuilder::default();
    let op = builder.merge_composite(
        Path::new("a.mp4"),
        Path::new("b.mp4"),
        MergeStrategy::Automatic,
        Path::new("merged_auto_001.mp4"),
    );
    let args = op.to_args();
    assert_eq!(arg_after(&args, "-c:a"), "copy");
    assert_eq!(arg_after(&args, "-b:v"), "6M");
    assert!(arg_after(&args, "-filter_complex").starts_with("[0:v]settb=AVTB[v0]"));
    assert!(op.duration_secs().is_none());
}

#[test]
fn test_zero_length_intermediate_rejected() {
    let builder = TranscodeOperationBuilder::default();
    assert!(builder
        .merge_intermediate(
            Timestamp::ZERO,
            0,
            &SourceDescriptor::local("a.mp4"),
            MergeStrategy::Automatic,
            true,
            Path::new("x.mp4"),
        )
        .is_err());
}

#[test]
fn test_overlay_composite_input_order() {
    let builder = TranscodeOperationBuilder::default();
    let op = builder.overlay_composite(
        Path::new("background_1080x1920.png"),
        Path::new("tmp_cut_001.mp4"),
        Path::new("overlay_001.mp4"),
    );
    assert_eq!(op.inputs()[0].location(), "background_1080x1920.png");
    assert_eq!(op.inputs()[1].location(), "tmp_cut_001.mp4");
    let args = op.to_args();
    assert_eq!(arg_after(&args, "-pix_fmt"), "yuv420p");
    assert!(!args.contains(&"-map".to_string()));
}

#[test]
fn test_preview_is_low_resolution() {
    let builder = TranscodeOperationBuilder::default();
    let op = builder.preview(
        &scene("00:00:01:000", "00:00:04:000"),
        &SourceDescriptor::local("a.mp4"),
        Path::new("previews/preview_temp.mp4"),
    );
    let args = op.to_args();
    assert_eq!(arg_after(&args, "-vf"), "scale=640:360");
    assert_eq!(arg_after(&args, "-crf"), "28");
    assert!(!args.contains(&"-hwaccel".to_string()));
}

#[test]
fn test_window_parse() {
    let window = SourceWindow::parse("00:00:10", "").unwrap();
    assert_eq!(window.start(), Timestamp::from_millis(10_000));
    assert!(window.end().is_none());

    assert!(matches!(
        SourceWindow::parse("", "00:01:00"),
        Err(DomainError::Format(_))
    ));
    assert!(matches!(
        SourceWindow::parse("00:01:00", "00:00:30"),
        Err(DomainError::Ordering { .. })
    ));
}

#[test]
fn test_cursor_offsets_follow_a_durations() {
    let mut cursor = MergeCursor::new(SourceWindow::parse("00:00:10", "").unwrap());
    let mut offsets = Vec::new();
    for (idx, d) in [2_000u64, 3_000, 4_000].into_iter().enumerate() {
        let clip = cursor.claim(idx + 1, d).unwrap();
        offsets.push(clip.offset.to_string());
        cursor.advance(clip.duration_ms);
    }
    assert_eq!(offsets, vec!["00:00:10.000", "00:00:12.000", "00:00:15.000"]);
}

#[test]
fn test_cursor_clamps_then_exhausts() {
    let mut cursor = MergeCursor::new(SourceWindow::parse("00:00:00", "00:00:06").unwrap());
    for (idx, d) in [2_000u64, 2_000].into_iter().enumerate() {
        let clip = cursor.claim(idx + 1, d).unwrap();
        assert!(!clip.clamped);
        cursor.advance(clip.duration_ms);
    }

    let third = cursor.claim(3, 3_000).unwrap();
    assert!(third.clamped);
    assert_eq!(third.duration_ms, 2_000);
    cursor.advance(third.duration_ms);

    assert_eq!(
        cursor.claim(4, 1_000),
        Err(DomainError::SourceExhausted {
            scene: 4,
            remaining_ms: 0
        })
    );
}

#[test]
fn test_cursor_exhausts_on_short_remainder() {
    let mut cursor = MergeCursor::new(SourceWindow::parse("00:00:00", "00:00:05").unwrap());
    cursor.advance(4_000);
    assert_eq!(
        cursor.claim(3, 3_000),
        Err(DomainError::SourceExhausted {
            scene: 3,
            remaining_ms: 1_000
        })
    );
}

#[test]
fn test_claim_does_not_move_cursor() {
    let cursor = MergeCursor::new(SourceWindow::parse("00:00:03", "").unwrap());
    cursor.claim(1, 2_000).unwrap();
    assert_eq!(cursor.position(), Timestamp::from_millis(3_000));
}
