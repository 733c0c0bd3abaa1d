use pretty_assertions::assert_eq;
use urlform::helpers::CommaSeparated;
use urlform::{Config, Error, Form};

#[derive(Debug, Default, Form)]
struct Scalars {
    #[form("Bool")]
    pub bool: bool,
    #[form("Int8")]
    pub int8: i8,
    #[form("Int64")]
    pub int64: i64,
    #[form("Uint")]
    pub uint: usize,
    #[form("Float32")]
    pub float32: f32,
    #[form("Float64")]
    pub float64: f64,
    #[form("String")]
    pub string: String,
}

#[derive(Debug, Default, Form)]
struct Pointers {
    #[form("Boolp")]
    pub boolp: Option<bool>,
    #[form("Float64p")]
    pub float64p: Option<f64>,
    #[form("Stringp")]
    pub stringp: Option<Box<String>>,
}

#[derive(Debug, Default, Form)]
struct Marshal {
    #[form("M")]
    pub m: CommaSeparated<String>,
    #[form("N")]
    pub n: Vec<String>,
}

#[derive(Debug, Default, Form)]
struct Embed0 {
    #[form("Field")]
    pub field: String,
    #[form(flatten)]
    pub embed1: Embed1,
}

#[derive(Debug, Default, Form)]
struct Embed1 {
    #[form("Field")]
    pub field: i32,
    #[form("Other,omitempty")]
    pub other: i32,
    #[form(flatten)]
    pub embed2: Embed2,
}

#[derive(Debug, Default, Form)]
struct Embed2 {
    #[form("Field")]
    pub field: f64,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn serialize_scalars() {
    let value = Scalars {
        bool: true,
        int8: -8,
        int64: 9_007_199_254_740_993,
        uint: 26,
        float32: 52.00001,
        float64: 52.64,
        string: "fifty one".to_owned(),
    };
    insta::assert_snapshot!(
        urlform::to_string(&value).unwrap(),
        @"Bool=true&Int8=-8&Int64=9007199254740993&Uint=26&Float32=52.00001&Float64=52.64&String=fifty+one"
    );
}

#[test]
fn serialize_zero_values() {
    // zero values are written unless the field asks otherwise
    insta::assert_snapshot!(
        urlform::to_string(&Scalars::default()).unwrap(),
        @"Bool=false&Int8=0&Int64=0&Uint=0&Float32=0&Float64=0&String="
    );
}

#[test]
fn serialize_pointers() {
    let value = Pointers {
        boolp: None,
        float64p: Some(52.0),
        stringp: Some(Box::new("foo".to_owned())),
    };
    insta::assert_snapshot!(urlform::to_string(&value).unwrap(), @"Float64p=52&Stringp=foo");
    assert_eq!(urlform::to_string(&Pointers::default()).unwrap(), "");
}

#[test]
fn serialize_codec_and_sequence() {
    let value = Marshal {
        m: CommaSeparated::from(strings(&["foo", "bar", "baz"])),
        n: strings(&["foo", "bar", "baz"]),
    };
    insta::assert_snapshot!(
        urlform::to_string(&value).unwrap(),
        @"M=foo%2Cbar%2Cbaz&N=foo&N=bar&N=baz"
    );
}

#[test]
fn serialize_embedded_duplicates() {
    let value = Embed0 {
        field: "string".to_owned(),
        embed1: Embed1 {
            field: 3467,
            other: 0,
            embed2: Embed2 { field: 34.67 },
        },
    };
    insta::assert_snapshot!(
        urlform::to_string(&value).unwrap(),
        @"Field=string&Field=3467&Field=34.67"
    );

    // decoding the output binds the shared key once
    let back: Embed0 = urlform::from_str("Field=string&Field=3467&Field=34.67").unwrap();
    assert_eq!(back.field, "string");
    assert_eq!(back.embed1.field, 0);
    assert_eq!(back.embed1.embed2.field, 0.0);
}

#[test]
fn serialize_pairs_and_values() {
    let value = Marshal {
        m: CommaSeparated::default(),
        n: strings(&["a b", ""]),
    };
    let pairs = urlform::to_pairs(&value).unwrap();
    assert_eq!(
        pairs,
        [
            ("M".to_owned(), String::new()),
            ("N".to_owned(), "a b".to_owned()),
            ("N".to_owned(), String::new()),
        ]
    );

    let values = urlform::to_values(&value).unwrap();
    assert_eq!(values.get("M"), Some(""));
    assert_eq!(values.get_all("N"), ["a b", ""]);
}

#[test]
fn serialize_omit_empty() {
    #[derive(Default, Form)]
    struct Filters {
        #[form("q,omitempty")]
        pub query: String,
        #[form("page,omitempty")]
        pub page: Option<u32>,
        #[form("tag,omitempty")]
        pub tags: Vec<String>,
        #[form("ids,omitempty")]
        pub ids: CommaSeparated<u64>,
        #[form("strict,omitempty")]
        pub strict: bool,
        #[form("limit")]
        pub limit: u32,
    }

    assert_eq!(urlform::to_string(&Filters::default()).unwrap(), "limit=0");

    let filters = Filters {
        query: "x".to_owned(),
        page: Some(0),
        tags: strings(&["t"]),
        ids: CommaSeparated::from(vec![1, 2]),
        strict: true,
        limit: 5,
    };
    insta::assert_snapshot!(
        urlform::to_string(&filters).unwrap(),
        @"q=x&page=0&tag=t&ids=1%2C2&strict=true&limit=5"
    );
}

#[test]
fn serialize_skips_hidden_fields() {
    #[derive(Form)]
    struct Account {
        pub name: String,
        #[allow(dead_code)]
        secret: String,
        #[form("-")]
        pub internal: std::cell::Cell<u8>,
        #[form("-,")]
        pub dash: String,
    }

    let account = Account {
        name: "ada".to_owned(),
        secret: "hunter2".to_owned(),
        internal: std::cell::Cell::new(1),
        dash: "d".to_owned(),
    };
    assert_eq!(urlform::to_string(&account).unwrap(), "name=ada");
}

#[test]
fn serialize_nested_structs_and_pointer_elements() {
    #[derive(Default, Form)]
    struct Outer {
        pub nested: Embed2,
        pub boxed: Option<Box<Embed2>>,
        pub maybe: Vec<Option<u8>>,
    }

    let outer = Outer {
        nested: Embed2 { field: 1.0 },
        boxed: Some(Box::default()),
        maybe: vec![Some(1), None, Some(3)],
    };
    assert_eq!(urlform::to_string(&outer).unwrap(), "maybe=1&maybe=&maybe=3");
}

#[test]
fn serialize_escaping() {
    #[derive(Form)]
    struct Query {
        #[form("a b")]
        pub key: String,
        pub text: String,
    }

    let query = Query {
        key: "x&y=z".to_owned(),
        text: "100% ~fine_.-".to_owned(),
    };
    insta::assert_snapshot!(
        urlform::to_string(&query).unwrap(),
        @"a+b=x%26y%3Dz&text=100%25+~fine_.-"
    );
    insta::assert_snapshot!(
        Config::new().use_form_encoding(true).serialize_string(&query).unwrap(),
        @"a%20b=x%26y%3Dz&text=100%25%20%7Efine_.-"
    );
}

#[test]
fn serialize_to_writer() {
    let mut buffer = Vec::new();
    urlform::to_writer(&Embed2 { field: -0.5 }, &mut buffer).unwrap();
    assert_eq!(buffer, b"Field=-0.5");

    let mut encoder = urlform::Encoder::new(Vec::new(), Config::new());
    encoder.encode(&Embed2 { field: 1.0 }).unwrap();
    encoder.encode(&Embed2 { field: 2.0 }).unwrap();
    assert_eq!(encoder.into_inner(), b"Field=1&Field=2");
}

#[test]
fn serialize_through_pointers() {
    let boxed = Box::new(Embed2 { field: 3.5 });
    assert_eq!(urlform::to_string(&boxed).unwrap(), "Field=3.5");

    let err = urlform::to_string(&None::<Embed2>).unwrap_err();
    assert_eq!(err.to_string(), "expected a reference to a struct, got nil");

    let err = urlform::to_string(&vec![1u8]).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}

#[test]
fn codec_errors_abort_encoding() {
    #[derive(Debug, Default)]
    struct Broken;

    impl urlform::codec::TextCodec for Broken {
        fn encode_text(&self) -> Result<String, urlform::codec::BoxError> {
            Err("cannot encode".into())
        }

        fn decode_text(&mut self, _: &str) -> Result<(), urlform::codec::BoxError> {
            Err("cannot decode".into())
        }
    }

    urlform::text_codec!(Broken);

    #[derive(Debug, Default, Form)]
    struct Holder {
        pub before: u8,
        pub broken: Broken,
    }

    let err = urlform::to_string(&Holder::default()).unwrap_err();
    assert!(matches!(err, Error::Codec(_)));
    assert_eq!(err.to_string(), "cannot encode");

    let err = urlform::from_str::<Holder>("before=1&broken=x").unwrap_err();
    assert_eq!(err.to_string(), "cannot decode");
}

#[test]
fn serialize_pointers_to_sequences() {
    #[derive(Default, Form)]
    struct Lists {
        pub xs: Option<Vec<u8>>,
        pub ys: Box<Vec<String>>,
        #[form("zs,omitempty")]
        pub zs: Option<Vec<i32>>,
    }

    let lists = Lists {
        xs: Some(vec![1, 2]),
        ys: Box::new(strings(&["a", "b"])),
        zs: None,
    };
    insta::assert_snapshot!(urlform::to_string(&lists).unwrap(), @"xs=1&xs=2&ys=a&ys=b");

    assert_eq!(urlform::to_string(&Lists::default()).unwrap(), "");
}
