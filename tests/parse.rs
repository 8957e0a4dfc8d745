use edif2ucf::error::ParseError;
use edif2ucf::sexpr::{parse_document, ExprKind};
use edif2ucf::Atom;

#[test]
fn parse_is_deterministic() {
    let src = r#"
(edif kovan_dvt1_PrjPcb
  (edifVersion 2 0 0)
  (edifLevel 0)
  (keywordMap
     (keywordLevel 0)
  ))
"#;
    assert_eq!(parse_document(src).unwrap(), parse_document(src).unwrap());
}

#[test]
fn atom_alternatives() {
    let doc = parse_document("(a -12 #FF# \"hi\" &13 x/y_z)").unwrap();
    let items = doc.list().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0].symbol(), Some(Atom::from("a")));
    assert_eq!(items[1].num(), Some(-12));
    assert_eq!(items[2].num(), Some(0xFF));
    assert_eq!(items[3].str(), Some("hi"));
    assert_eq!(items[4].text().as_deref(), Some("&13"));
    assert_eq!(items[5].symbol(), Some(Atom::from("x/y_z")));
}

#[test]
fn bare_digits_stay_textual() {
    // positional references without the sigil keep their textual form
    let doc = parse_document("(123)").unwrap();
    assert_eq!(doc.list().unwrap()[0].symbol(), Some(Atom::from("123")));
}

#[test]
fn hex_allows_interior_whitespace() {
    let doc = parse_document("(#12 34#)").unwrap();
    assert_eq!(doc.list().unwrap()[0].num(), Some(0x1234));
}

#[test]
fn raw_token_carries_its_length() {
    let doc = parse_document("(x 7:M_SERVO )").unwrap();
    assert_eq!(doc.list().unwrap()[1].str(), Some("M_SERVO"));
}

#[test]
fn raw_length_mismatch_is_fatal() {
    match parse_document("5:abc") {
        Err(ParseError::LengthMismatch {
            expected, actual, ..
        }) => assert_eq!((expected, actual), (5, 3)),
        other => panic!("expected a length mismatch, got {:?}", other),
    }
}

#[test]
fn base64_length_checks_decoded_byte_count() {
    let doc = parse_document("(blob |YWJjZA==|)").unwrap();
    assert_eq!(
        doc.list().unwrap()[1].kind,
        ExprKind::Bytes(b"abcd".to_vec())
    );

    // declared length counts decoded bytes, not encoded characters
    assert!(parse_document("(blob 4|YWJjZA==|)").is_ok());
    match parse_document("(blob 6|YWJjZA==|)") {
        Err(ParseError::LengthMismatch {
            expected, actual, ..
        }) => assert_eq!((expected, actual), (6, 4)),
        other => panic!("expected a length mismatch, got {:?}", other),
    }
}

#[test]
fn display_hints_are_dropped() {
    let doc = parse_document("(port [5] R19)").unwrap();
    let items = doc.list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].symbol(), Some(Atom::from("R19")));
}

#[test]
fn empty_input_rejected() {
    assert!(matches!(
        parse_document(""),
        Err(ParseError::Syntax { .. })
    ));
    assert!(matches!(
        parse_document("  \n\t"),
        Err(ParseError::Syntax { .. })
    ));
}

#[test]
fn trailing_garbage_rejected() {
    assert!(matches!(
        parse_document("(a b) c"),
        Err(ParseError::Syntax { .. })
    ));
}

#[test]
fn forms_nest_to_arbitrary_depth() {
    let doc = parse_document("(a (b (c (d (e)))))").unwrap();
    let inner = doc.list().unwrap()[1].list().unwrap()[1].list().unwrap();
    assert_eq!(inner[0].symbol(), Some(Atom::from("c")));
}
