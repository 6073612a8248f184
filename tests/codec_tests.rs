//! Serde bridge tests: derived types traveling through S-expression text in
//! both directions, plus the error paths.

use serde::{Deserialize, Serialize};
use serde_sexp::{
    from_str, from_str_with_options, from_value, to_string, to_string_with_options, to_value,
    Error, Options, Sexp, Syntax,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Package {
    version: u32,
    name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Release {
    package: Package,
    stable: bool,
    checksum: Option<String>,
    targets: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Shape {
    Empty,
    Circle(f64),
    Segment(f64, f64),
    Rect { width: f64, height: f64 },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Meters(f64);

#[test]
fn structs_travel_as_association_lists() {
    let package = Package {
        version: 666,
        name: "foobar".to_string(),
    };
    let text = to_string(&package).unwrap();
    assert_eq!(text, "((version . 666) (name . foobar))");
    assert_eq!(from_str::<Package>(&text).unwrap(), package);
}

#[test]
fn nested_structs_round_trip() {
    let release = Release {
        package: Package {
            version: 3,
            name: "tool".to_string(),
        },
        stable: true,
        checksum: None,
        targets: vec!["linux".to_string(), "macos".to_string()],
    };
    let text = to_string(&release).unwrap();
    assert_eq!(from_str::<Release>(&text).unwrap(), release);
}

#[test]
fn string_values_choose_symbol_or_string_spelling() {
    assert_eq!(to_string(&"foobar").unwrap(), "foobar");
    assert_eq!(to_string(&"two words").unwrap(), "\"two words\"");
    assert_eq!(to_string(&"").unwrap(), "\"\"");
    // both spellings decode as text
    assert_eq!(from_str::<String>("foobar").unwrap(), "foobar");
    assert_eq!(from_str::<String>("\"foobar\"").unwrap(), "foobar");
}

#[test]
fn scalars_round_trip() {
    assert_eq!(to_string(&true).unwrap(), "#t");
    assert_eq!(from_str::<bool>("#f").unwrap(), false);
    assert_eq!(to_string(&'x').unwrap(), "#\\x");
    assert_eq!(from_str::<char>("#\\newline").unwrap(), '\n');
    assert_eq!(to_string(&-17i64).unwrap(), "-17");
    assert_eq!(to_string(&2.5f64).unwrap(), "2.5");
    assert_eq!(from_str::<f64>("1/4").unwrap(), 0.25);
    assert_eq!(from_str::<u128>("340282366920938463463374607431768211455").unwrap(), u128::MAX);
}

#[test]
fn sequences_and_tuples() {
    assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "(1 2 3)");
    assert_eq!(to_string(&(1, "a", true)).unwrap(), "(1 a #t)");
    assert_eq!(from_str::<Vec<i32>>("(1 2 3)").unwrap(), vec![1, 2, 3]);
    // vectors also feed sequences
    assert_eq!(from_str::<Vec<i32>>("#(1 2 3)").unwrap(), vec![1, 2, 3]);
    assert_eq!(from_str::<(i32, String)>("(1 two)").unwrap(), (1, "two".to_string()));
    assert_eq!(to_string(&Vec::<i32>::new()).unwrap(), "()");
}

#[test]
fn maps_round_trip_in_order() {
    let mut map = BTreeMap::new();
    map.insert("alpha".to_string(), 1);
    map.insert("beta".to_string(), 2);
    let text = to_string(&map).unwrap();
    assert_eq!(text, "((alpha . 1) (beta . 2))");
    assert_eq!(from_str::<BTreeMap<String, i32>>(&text).unwrap(), map);
}

#[test]
fn map_keys_must_be_text() {
    let mut map = BTreeMap::new();
    map.insert(1, "one");
    assert!(matches!(to_string(&map), Err(Error::InvalidValue(_))));
}

#[test]
fn options_and_units() {
    assert_eq!(to_string(&Option::<i32>::None).unwrap(), "()");
    assert_eq!(to_string(&Some(3)).unwrap(), "3");
    assert_eq!(from_str::<Option<i32>>("()").unwrap(), None);
    assert_eq!(from_str::<Option<i32>>("3").unwrap(), Some(3));
    assert_eq!(to_string(&()).unwrap(), "()");
    assert_eq!(from_str::<()>("()").unwrap(), ());
}

#[test]
fn newtype_structs_are_transparent() {
    assert_eq!(to_string(&Meters(1.5)).unwrap(), "1.5");
    assert_eq!(from_str::<Meters>("1.5").unwrap(), Meters(1.5));
}

#[test]
fn unit_variants_are_their_name() {
    assert_eq!(to_string(&Shape::Empty).unwrap(), "Empty");
    assert_eq!(from_str::<Shape>("Empty").unwrap(), Shape::Empty);
    assert_eq!(from_str::<Shape>("\"Empty\"").unwrap(), Shape::Empty);
}

#[test]
fn payload_variants_are_single_entry_associations() {
    let circle = Shape::Circle(2.0);
    let text = to_string(&circle).unwrap();
    assert_eq!(text, "((Circle . 2.0))");
    assert_eq!(from_str::<Shape>(&text).unwrap(), circle);

    // a pair whose tail is itself a list prints as one chain
    let segment = Shape::Segment(0.0, 4.5);
    let text = to_string(&segment).unwrap();
    assert_eq!(text, "((Segment 0.0 4.5))");
    assert_eq!(from_str::<Shape>(&text).unwrap(), segment);
    // the dotted spelling decodes to the same value
    assert_eq!(
        from_str::<Shape>("((Segment . (0.0 4.5)))").unwrap(),
        segment
    );

    let rect = Shape::Rect {
        width: 2.0,
        height: 3.0,
    };
    let text = to_string(&rect).unwrap();
    assert_eq!(text, "((Rect (width . 2.0) (height . 3.0)))");
    assert_eq!(from_str::<Shape>(&text).unwrap(), rect);
}

#[test]
fn unknown_variant_is_an_error() {
    assert!(from_str::<Shape>("Pentagon").is_err());
}

#[test]
fn type_mismatch_carries_the_field_path() {
    let err = from_str::<Release>(
        "((package . ((version . oops) (name . tool))) (stable . #t) (checksum . ()) (targets . ()))",
    )
    .unwrap_err();
    match err {
        Error::TypeMismatch { path, expected, .. } => {
            assert_eq!(path, "package.version");
            assert_eq!(expected, "u32");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn sequence_mismatch_carries_the_index() {
    let err = from_str::<Vec<i32>>("(1 2 three)").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "[2]"));
}

#[test]
fn missing_fields_are_reported_by_key() {
    let err = from_str::<Package>("((version . 1))").unwrap_err();
    assert!(matches!(err, Error::KeyNotFound { ref key } if key == "name"));
}

#[test]
fn integer_range_is_checked() {
    assert!(matches!(
        from_str::<u8>("256"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        from_str::<u32>("-1"),
        Err(Error::TypeMismatch { .. })
    ));
    // exact non-integers do not silently truncate
    assert!(matches!(
        from_str::<i32>("1/2"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn trailing_garbage_is_an_error() {
    assert!(matches!(
        from_str::<i32>("1 2"),
        Err(Error::TrailingGarbage { .. })
    ));
}

#[test]
fn dialect_options_flow_through_the_bridge() {
    let conservative = Options::new().with_syntax(Syntax::R5rs);
    let package = Package {
        version: 1,
        name: "lib".to_string(),
    };
    let text = to_string_with_options(&package, conservative).unwrap();
    assert_eq!(text, "((version . 1) (name . lib))");
    assert_eq!(
        from_str_with_options::<Package>(&text, conservative).unwrap(),
        package
    );
    // rich-only literals stay out of the conservative dialect
    assert!(from_str_with_options::<bool>("#true", conservative).is_err());
    assert!(matches!(
        to_string_with_options(&f64::INFINITY, conservative),
        Err(Error::CannotRepresent { .. })
    ));
}

#[test]
fn value_level_bridge() {
    let package = Package {
        version: 2,
        name: "direct".to_string(),
    };
    let tree = to_value(&package).unwrap();
    assert_eq!(
        tree,
        Sexp::list([
            Sexp::pair(Sexp::symbol("version"), Sexp::from(2)),
            Sexp::pair(Sexp::symbol("name"), Sexp::symbol("direct")),
        ])
    );
    assert_eq!(from_value::<Package>(tree).unwrap(), package);
}

#[test]
fn special_field_text_falls_back_to_strings() {
    let mut map = BTreeMap::new();
    map.insert("two words".to_string(), 1);
    let text = to_string(&map).unwrap();
    assert_eq!(text, "((\"two words\" . 1))");
    assert_eq!(from_str::<BTreeMap<String, i32>>(&text).unwrap(), map);
}

#[test]
fn untagged_decoding_keeps_whole_floats_inexact() {
    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Real(f64),
        Text(String),
    }

    assert_eq!(from_str::<Loose>("42.0").unwrap(), Loose::Real(42.0));
    assert_eq!(from_str::<Loose>("42").unwrap(), Loose::Int(42));
    assert_eq!(
        from_str::<Loose>("word").unwrap(),
        Loose::Text("word".to_string())
    );
}

#[test]
fn pretty_bridge_output_round_trips() {
    let release = Release {
        package: Package {
            version: 9,
            name: "big".to_string(),
        },
        stable: false,
        checksum: Some("abc123".to_string()),
        targets: vec!["a".to_string(), "b".to_string(), "c".to_string()],
    };
    let text = to_string_with_options(&release, Options::pretty()).unwrap();
    assert!(text.contains('\n'));
    assert_eq!(from_str::<Release>(&text).unwrap(), release);
}
