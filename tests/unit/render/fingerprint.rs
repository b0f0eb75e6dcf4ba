use super::*;

#[test]
fn identical_documents_share_a_fingerprint() {
    let a = fingerprint_svg("<svg><rect/></svg>");
    let b = fingerprint_svg("<svg><rect/></svg>");
    assert_eq!(a, b);
}

#[test]
fn any_change_moves_the_fingerprint() {
    let a = fingerprint_svg(r#"<svg><rect fill-opacity="0.5"/></svg>"#);
    let b = fingerprint_svg(r#"<svg><rect fill-opacity="0.51"/></svg>"#);
    assert_ne!(a, b);
    assert_ne!(fingerprint_svg(""), fingerprint_svg(" "));
}
