//! Property tests: any representable value survives a format/parse round
//! trip, and typed data survives the bridge.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_sexp::{from_str, to_string, to_string_pretty, Formatter, Sexp, Syntax};

fn leaf() -> impl Strategy<Value = Sexp> {
    prop_oneof![
        any::<bool>().prop_map(Sexp::from),
        any::<i64>().prop_map(Sexp::from),
        any::<f64>().prop_map(Sexp::from),
        any::<char>().prop_map(Sexp::from),
        ".{0,12}".prop_map(Sexp::from),
        "[a-z<>=!?*][a-z0-9<>=!?*.+-]{0,8}".prop_map(Sexp::symbol),
        prop::collection::vec(any::<u8>(), 0..6).prop_map(Sexp::Bytevector),
        Just(Sexp::Null),
    ]
}

fn sexp() -> impl Strategy<Value = Sexp> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Sexp::list),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Sexp::Vector),
            (inner.clone(), inner).prop_map(|(head, tail)| Sexp::pair(head, tail)),
        ]
    })
}

proptest! {
    #[test]
    fn compact_output_parses_back(value in sexp()) {
        let text = Formatter::new(Syntax::R7rsPartial, false).format(&value).unwrap();
        let parsed: Sexp = text.parse().unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn pretty_output_parses_back(value in sexp()) {
        let text = Formatter::new(Syntax::R7rsPartial, true).format(&value).unwrap();
        let parsed: Sexp = text.parse().unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn conservative_output_parses_conservatively(value in sexp()) {
        // not every value has a conservative spelling; those that do must
        // survive the stricter grammar too
        if let Ok(text) = Formatter::new(Syntax::R5rs, false).format(&value) {
            let parsed = serde_sexp::Parser::new(Syntax::R5rs, serde_sexp::Verbosity::Silent)
                .parse(&text)
                .unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    label: String,
    count: u32,
    offset: i64,
    enabled: bool,
    note: Option<String>,
    values: Vec<u16>,
}

proptest! {
    #[test]
    fn typed_data_survives_the_bridge(
        label in ".{0,16}",
        count in any::<u32>(),
        offset in any::<i64>(),
        enabled in any::<bool>(),
        note in prop::option::of(".{1,8}"),
        values in prop::collection::vec(any::<u16>(), 0..8),
    ) {
        let record = Record { label, count, offset, enabled, note, values };
        let text = to_string(&record).unwrap();
        prop_assert_eq!(&from_str::<Record>(&text).unwrap(), &record);
        let pretty = to_string_pretty(&record).unwrap();
        prop_assert_eq!(&from_str::<Record>(&pretty).unwrap(), &record);
    }

    #[test]
    fn numbers_survive_textual_round_trips(n in any::<i64>(), f in any::<f64>()) {
        prop_assert_eq!(from_str::<i64>(&to_string(&n).unwrap()).unwrap(), n);
        let back = from_str::<f64>(&to_string(&f).unwrap()).unwrap();
        if f.is_nan() {
            prop_assert!(back.is_nan());
        } else {
            prop_assert_eq!(back, f);
        }
    }
}
