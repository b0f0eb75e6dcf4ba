use super::*;

#[test]
fn empty_text_has_no_width_but_one_line() {
    let e = measure("", 22.0, FontWeight::Normal);
    assert_eq!(e.width, 0.0);
    assert_eq!(e.lines, 1);
    assert!(e.height > 0.0);
}

#[test]
fn width_scales_linearly_with_font_size() {
    let a = measure("Request 1", 26.0, FontWeight::Normal);
    let b = measure("Request 1", 52.0, FontWeight::Normal);
    assert!((b.width - 2.0 * a.width).abs() < 1e-9);
    assert!((b.height - 2.0 * a.height).abs() < 1e-9);
}

#[test]
fn bold_is_wider() {
    let n = measure("LIMIT: 5", 22.0, FontWeight::Normal);
    let b = measure("LIMIT: 5", 22.0, FontWeight::Bold);
    assert!(b.width > n.width);
    assert_eq!(b.height, n.height);
}

#[test]
fn multi_line_uses_widest_line_and_stacks_heights() {
    let e = measure("Booking\nService", 18.0, FontWeight::Normal);
    assert_eq!(e.lines, 2);
    let widest = line_width_em("Booking", FontWeight::Normal)
        .max(line_width_em("Service", FontWeight::Normal));
    assert!((e.width - widest * e.em).abs() < 1e-12);
    assert!((e.height - (ASCENT_EM + LINE_HEIGHT_EM) * e.em).abs() < 1e-12);
}

#[test]
fn descenders_extend_the_last_line() {
    let plain = measure("ABC", 48.0, FontWeight::Normal);
    let low = measure("Abg", 48.0, FontWeight::Normal);
    assert!((low.height - plain.height - DESCENT_EM * low.em).abs() < 1e-12);
}
