//! Integration tests for text rendering.
//!
//! Fixtures are the DejaVu Sans and DejaVu Sans Mono faces under `tests/fonts`.

use horizon_imagetext::image::{DynamicImage, Rgba, RgbaImage};
use horizon_imagetext::text::{
    EmojiOptions, EmojiRegistry, EmojiSource, EntryKind, Font, FontFace, LayoutParams, Shaper,
    break_lines, layout_lines,
};
use horizon_imagetext::{
    Canvas, Color, DrawSession, ErrorKind, Paint, Point, TextAlign, TextError, TextStyle,
    WrapStyle, draw_text, draw_text_anchored, draw_text_multiline, draw_text_wrapped, text_size,
    text_wrap,
};

const SANS: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");
const MONO: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn sans() -> Font {
    Font::new(FontFace::from_data(SANS.to_vec(), 0).expect("valid font"))
}

fn mono() -> Font {
    Font::new(FontFace::from_data(MONO.to_vec(), 0).expect("valid font"))
}

/// A registry with a solid red 16x16 image for U+1F604.
fn smile_registry() -> EmojiRegistry {
    let mut registry = EmojiRegistry::new();
    registry.insert(
        EmojiSource::Twitter,
        "\u{1F604}",
        RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255])),
    );
    registry
}

fn opaque_mask(canvas: &Canvas) -> Vec<bool> {
    canvas.to_bytes().chunks(4).map(|px| px[3] > 0).collect()
}

// ============================================================================
// Emoji
// ============================================================================

#[test]
fn test_shortcode_shapes_to_one_emoji() {
    init_logging();
    let font = sans();
    let registry = smile_registry();
    let run = Shaper::new(&font, 20.0)
        .with_emojis(&registry, EmojiOptions::default())
        .shape("Hi :smile:")
        .unwrap();

    assert_eq!(run.len(), 4);
    assert_eq!(run.emoji_count(), 1);
    let emoji = &run.entries()[3];
    assert_eq!(emoji.cluster, 3..10);
    assert_eq!(emoji.advance, 20.0);
}

#[test]
fn test_unknown_shortcode_is_drawn_as_text() {
    let font = sans();
    let registry = smile_registry();
    let text = "Hi :nope_not_real:";
    let run = Shaper::new(&font, 20.0)
        .with_emojis(&registry, EmojiOptions::default())
        .shape(text)
        .unwrap();

    assert_eq!(run.emoji_count(), 0);
    assert_eq!(run.len(), text.chars().count());
}

#[test]
fn test_shortcodes_can_be_disabled() {
    let font = sans();
    let registry = smile_registry();
    let run = Shaper::new(&font, 20.0)
        .with_emojis(&registry, EmojiOptions::default().parse_shortcodes(false))
        .shape(":smile: \u{1F604}")
        .unwrap();

    assert_eq!(run.emoji_count(), 1);
    assert!(run.entries().last().unwrap().is_emoji());
}

#[test]
fn test_emoji_image_is_composited() {
    init_logging();
    let font = sans();
    let registry = smile_registry();
    let style = TextStyle::new(&font, 20.0).emojis(&registry);

    let mut canvas = Canvas::new(60, 40, Color::TRANSPARENT).unwrap();
    let bounds = draw_text(&mut canvas, "\u{1F604}", 10.0, 10.0, &style).unwrap();
    assert_eq!(bounds.width(), 20.0);

    let center = canvas.pixel(20, 20).unwrap();
    assert_eq!(center.a, 255);
    assert!(center.r > 250);
    assert!(center.g < 5 && center.b < 5);
    assert_eq!(canvas.pixel(45, 20).unwrap().a, 0);
}

#[test]
fn test_emoji_shift_moves_the_image() {
    let font = sans();
    let registry = smile_registry();
    let style = TextStyle::new(&font, 20.0)
        .emojis(&registry)
        .emoji_options(EmojiOptions::default().shift(20, 0));

    let mut canvas = Canvas::new(60, 40, Color::TRANSPARENT).unwrap();
    draw_text(&mut canvas, "\u{1F604}", 0.0, 0.0, &style).unwrap();
    assert_eq!(canvas.pixel(10, 10).unwrap().a, 0);
    assert_eq!(canvas.pixel(30, 10).unwrap().a, 255);
}

// ============================================================================
// Fonts
// ============================================================================

#[test]
fn test_fallback_face_supplies_missing_glyphs() {
    let font = Font::with_fallbacks(
        FontFace::from_data(MONO.to_vec(), 0).unwrap(),
        [FontFace::from_data(SANS.to_vec(), 0).unwrap()],
    );
    let run = Shaper::new(&font, 16.0).shape("A\u{01C4}\u{E000}").unwrap();

    let faces: Vec<(usize, bool)> = run
        .entries()
        .iter()
        .map(|entry| match entry.kind {
            EntryKind::Glyph { face, found, .. } => (face, found),
            _ => panic!("expected glyphs"),
        })
        .collect();
    assert_eq!(faces, vec![(0, true), (1, true), (0, false)]);
}

#[test]
fn test_invalid_font_data_is_a_resource_error() {
    let err = FontFace::from_data(vec![0; 64], 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
}

// ============================================================================
// Painting
// ============================================================================

#[test]
fn test_stroke_is_superset_of_fill() {
    let font = sans();
    let render = |style: &TextStyle<'_>| {
        let mut canvas = Canvas::new(160, 50, Color::TRANSPARENT).unwrap();
        draw_text(&mut canvas, "Stroke", 5.0, 5.0, style).unwrap();
        opaque_mask(&canvas)
    };

    let fill = render(&TextStyle::new(&font, 32.0));
    let stroked = render(&TextStyle::new(&font, 32.0).stroke(2.0, Color::WHITE));
    assert!(fill.iter().zip(&stroked).all(|(&f, &s)| !f || s));
    assert!(stroked.iter().filter(|&&s| s).count() > fill.iter().filter(|&&f| f).count());
}

#[test]
fn test_gradient_fill_varies_across_text() {
    let font = sans();
    let paint = Paint::gradient(
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        &[Color::RED, Color::BLUE],
    );
    let style = TextStyle::new(&font, 40.0).fill(paint);
    let mut canvas = Canvas::new(200, 50, Color::TRANSPARENT).unwrap();
    draw_text(&mut canvas, "IIIIIIIIIIIIIII", 0.0, 0.0, &style).unwrap();

    let solid: Vec<(u32, Color)> = (0..canvas.width())
        .filter_map(|x| canvas.pixel(x, 25).map(|c| (x, c)))
        .filter(|(_, c)| c.a == 255)
        .collect();
    let (_, left) = solid.first().copied().unwrap();
    let (_, right) = solid.last().copied().unwrap();
    assert!(left.r > left.b);
    assert!(right.b > right.r);
}

#[test]
fn test_drawing_outside_the_canvas_is_clipped() {
    let font = sans();
    let style = TextStyle::new(&font, 24.0);
    let mut canvas = Canvas::new(40, 40, Color::TRANSPARENT).unwrap();

    draw_text(&mut canvas, "far away", 500.0, 500.0, &style).unwrap();
    draw_text(&mut canvas, "far away", -500.0, -500.0, &style).unwrap();
    assert_eq!(canvas.count_opaque(), 0);

    draw_text(&mut canvas, "WW", -10.0, -10.0, &style).unwrap();
    assert!(canvas.count_opaque() > 0);
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_anchor_centers_the_block() {
    let font = sans();
    let style = TextStyle::new(&font, 20.0);
    let mut canvas = Canvas::new(200, 100, Color::WHITE).unwrap();

    let bounds = draw_text_anchored(&mut canvas, "centered", 100.0, 50.0, (0.5, 0.5), &style).unwrap();
    let center = bounds.center();
    assert!((center.x - 100.0).abs() < 1e-3);
    assert!((center.y - 50.0).abs() < 1e-3);

    let bounds = draw_text_multiline(&mut canvas, "a\nb\nc", 100.0, 90.0, (1.0, 1.0), &style).unwrap();
    assert!((bounds.right() - 100.0).abs() < 1e-3);
    assert!((bounds.bottom() - 90.0).abs() < 1e-3);
}

#[test]
fn test_center_alignment_centers_each_line() {
    let font = mono();
    let run = Shaper::new(&font, 10.0).shape("ab\nabcdef").unwrap();
    let lines = break_lines(&run, None, WrapStyle::Word);
    let params = LayoutParams::new(10.0).align(TextAlign::Center);
    let block = layout_lines(&lines, &font, &params);

    let short = &block.lines[0];
    let long = &block.lines[1];
    assert_eq!(long.origin.x, 0.0);
    let short_center = short.origin.x + short.line.width() / 2.0;
    assert!((short_center - block.width() / 2.0).abs() < 1e-3);
    assert!(short.baseline > short.origin.y);
    assert!(short.baseline < long.origin.y);
}

#[test]
fn test_text_size_matches_drawn_bounds() {
    let font = sans();
    let style = TextStyle::new(&font, 18.0);
    let mut canvas = Canvas::new(300, 40, Color::WHITE).unwrap();
    let bounds = draw_text(&mut canvas, "Measure me", 0.0, 0.0, &style).unwrap();
    let (w, h) = text_size("Measure me", &style).unwrap();
    assert_eq!(w, bounds.width().ceil() as u32);
    assert_eq!(h, bounds.height().ceil() as u32);
}

// ============================================================================
// Wrapping
// ============================================================================

#[test]
fn test_wrapped_lines_fit_and_rewrap_to_themselves() {
    let font = mono();
    let text = "Sphinx of black quartz, judge my vow. The five boxing wizards jump quickly.";
    for wrap_style in [WrapStyle::Word, WrapStyle::Character] {
        let style = TextStyle::new(&font, 12.0).wrap_style(wrap_style);
        let width = 120.0;
        let lines = text_wrap(text, width, &style).unwrap();
        assert!(lines.len() > 1);

        for line in &lines {
            let (w, _) = text_size(line, &style).unwrap();
            assert!(w as f32 <= width + 1.0, "{line:?} is {w}px wide");
            assert_eq!(text_wrap(line, width, &style).unwrap(), vec![line.clone()]);
        }
    }
}

#[test]
fn test_word_wrap_keeps_overlong_words_whole() {
    let font = mono();
    let style = TextStyle::new(&font, 12.0);
    let lines = text_wrap("a incomprehensibilities b", 30.0, &style).unwrap();
    assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);

    let style = style.wrap_style(WrapStyle::Character);
    let lines = text_wrap("incomprehensibilities", 30.0, &style).unwrap();
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), "incomprehensibilities");
}

#[test]
fn test_wrapped_draw_reports_line_count() {
    let font = mono();
    let style = TextStyle::new(&font, 10.0).line_spacing(1.2);
    let mut canvas = Canvas::new(100, 100, Color::WHITE).unwrap();
    let lines = text_wrap("one two three four", 40.0, &style).unwrap();
    let bounds =
        draw_text_wrapped(&mut canvas, "one two three four", 0.0, 0.0, (0.0, 0.0), 40.0, &style).unwrap();
    assert!((bounds.height() - 12.0 * lines.len() as f32).abs() < 1e-3);
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_session_writes_back_on_close() {
    init_logging();
    let font = sans();
    let mut image = DynamicImage::new_rgba8(80, 40);

    let mut session = DrawSession::open(&mut image).unwrap();
    session
        .draw_text("Hi", 4.0, 4.0, &TextStyle::new(&font, 24.0).fill(Color::GREEN))
        .unwrap();
    session.close();

    let rgba = image.as_rgba8().unwrap();
    assert!(rgba.pixels().any(|p| p.0[3] > 0));
}

#[test]
fn test_session_keeps_pixels_it_does_not_draw_on() {
    let font = sans();
    for background in [Rgba([1, 2, 3, 255]), Rgba([200, 100, 50, 3]), Rgba([10, 250, 130, 40])] {
        let mut image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 40, background));
        {
            let mut session = DrawSession::open(&mut image).unwrap();
            session.draw_text("x", 100.0, 100.0, &TextStyle::new(&font, 12.0)).unwrap();
        }
        let rgba = image.as_rgba8().unwrap();
        assert!(rgba.pixels().all(|p| *p == background), "{background:?}");
    }
}

#[test]
fn test_session_drawing_leaves_translucent_surroundings_alone() {
    let font = sans();
    let background = Rgba([200, 100, 50, 3]);
    let mut image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(60, 40, background));

    let mut session = DrawSession::open(&mut image).unwrap();
    session.draw_text("Hi", 2.0, 2.0, &TextStyle::new(&font, 24.0)).unwrap();
    session.close();

    let rgba = image.as_rgba8().unwrap();
    let changed = rgba.pixels().filter(|p| **p != background).count();
    assert!(changed > 0);
    assert_eq!(rgba.get_pixel(59, 39), &background);
    assert_eq!(rgba.get_pixel(0, 39), &background);
}

#[test]
fn test_session_rejects_non_rgba_images() {
    let mut image = DynamicImage::new_rgb8(10, 10);
    let err = DrawSession::open(&mut image).unwrap_err();
    assert!(matches!(err, TextError::UnsupportedPixelFormat(_)));
    assert!(err.is_configuration());
}
