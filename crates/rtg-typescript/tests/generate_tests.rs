use rtg_core::GeneratedTypes;
use rtg_core::config::NameCollisionPolicy;
use rtg_core::transform::SynthesisOptions;
use rtg_typescript::highlight::{highlight, tokenize};
use rtg_typescript::{generate_types, generate_types_with, process_json_input};
use serde_json::{Value, json};

fn order_record() -> Value {
    json!({
        "id": "ord_81",
        "created": "2024-03-02 09:15:00",
        "updated": "2024-03-04 18:40:12",
        "collectionId": "k2",
        "collectionName": "orders",
        "data": {
            "customerName": "Kim",
            "email": "kim@example.com",
            "forminfo": {"submitted": true, "step": 3},
            "carInfo": {"model": "Ioniq", "plate": null},
            "items": [
                {"sku": "A-1", "qty": 2, "price": 9.5},
                {"sku": "B-7", "qty": 1, "price": 20}
            ],
            "people": [{"name": "Lee", "phone": "010-0000-0000"}],
            "labels": {"en": "Order", "ko": "주문"},
            "notes": [],
            "discount": null
        }
    })
}

#[test]
fn end_to_end_record() {
    let record = json!({
        "id": "1",
        "created": "2024-01-01T00:00:00Z",
        "collectionId": "c1",
        "collectionName": "posts",
        "data": {"title": "Hello", "tags": ["a", "b"]}
    });
    let out = generate_types(&record, Some("Record"));
    insta::assert_snapshot!(out.source_code, @r###"
    interface Record {
      id: string;
      created: string;
      title: string;
      tags: string[];
    }
    "###);
}

#[test]
fn order_record_renders_nested_first() {
    let out = generate_types(&order_record(), Some("Order"));
    insta::assert_snapshot!(out.source_code, @r###"
    interface FormInfo {
      submitted: boolean;
      step: number;
    }

    interface CarInfo {
      model: string;
      plate: null;
    }

    interface Item {
      sku: string;
      qty: number;
      price: number;
    }

    interface Person {
      name: string;
      phone: string;
    }

    interface Labels {
      en: string;
      ko: string;
    }

    interface Order {
      id: string;
      created: string;
      updated: string;
      customerName: string;
      email: string;
      forminfo: FormInfo;
      carInfo: CarInfo;
      items: Item[];
      people: Person[];
      labels: Labels;
      notes: any[];
      discount: null;
    }
    "###);
}

#[test]
fn record_list_renders_inline_shapes() {
    let records = json!([
        {"id": "1", "data": {"meta": {"viewCount": 3, "author": "kim"}, "mixed": [1, "a"]}},
        {"id": "2", "data": {"meta": {"viewCount": 4, "author": "lee"}}}
    ]);
    let out = generate_types(&records, Some("Post"));
    insta::assert_snapshot!(out.source_code, @r###"
    interface Post {
      id: string;
      meta: {
        viewCount: number; // Count value
        author: string;
      };
      mixed?: (number | string)[];
    }
    "###);
}

#[test]
fn nested_hoisting_through_data() {
    let out = generate_types(&json!({"id": "x", "data": {"user": {"name": "A"}}}), None);
    assert!(out.source_code.contains("interface User {\n  name: string;\n}"));
    assert!(out.source_code.contains("  user: User;"));
    assert!(!out.source_code.contains("data"));

    let out = generate_types(&json!({"data": {"books": [{"title": "T"}]}}), None);
    assert!(out.source_code.contains("interface Book {"));
    assert!(out.source_code.contains("  books: Book[];"));
}

#[test]
fn output_is_deterministic() {
    let first = generate_types(&order_record(), Some("Order"));
    let second = generate_types(&order_record(), Some("Order"));
    assert_eq!(first, second);
}

#[test]
fn markup_matches_source() {
    let out = generate_types(&order_record(), Some("Order"));
    assert_eq!(out.highlighted_markup, highlight(&out.source_code));
    assert!(out
        .highlighted_markup
        .starts_with("<span class=\"syntax-keyword\">interface</span>"));
}

#[test]
fn apostrophe_key_keeps_highlighting() {
    let out = generate_types(&json!({"it's": 1, "ok": true}), None);
    assert_eq!(
        out.source_code,
        "interface Record {\n  it's: number;\n  ok: boolean;\n}"
    );
    assert!(out
        .highlighted_markup
        .contains("<span class=\"syntax-type\">boolean</span>"));
    assert!(out
        .highlighted_markup
        .ends_with("<span class=\"syntax-punctuation\">}</span>"));
}

#[test]
fn tokenization_is_lossless() {
    let sources = [
        generate_types(&order_record(), Some("Order")).source_code,
        generate_types(&json!([{"a": {"b": [1, "x"], "c": null}}]), None).source_code,
        generate_types(&json!(42), None).source_code,
    ];
    for source in sources {
        let rebuilt: String = tokenize(&source).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);
    }
}

#[test]
fn deep_nesting_collapses() {
    let mut value = json!({"leaf": true, "tag": "x"});
    for level in (1..=10).rev() {
        let mut parent = serde_json::Map::new();
        parent.insert(format!("level{level}"), value);
        parent.insert("tag".to_string(), json!("x"));
        value = Value::Object(parent);
    }
    let out = generate_types(&value, None);
    let blocks = out.source_code.matches("interface ").count();
    assert_eq!(blocks, 4);
    assert!(out.source_code.contains("  level4: Record<string, unknown>;"));
}

#[test]
fn duplicate_names_follow_policy() {
    let value = json!({
        "billing": {"info": {"iban": "x", "ok": true}},
        "shipping": {"info": {"carrier": "y", "days": 2}}
    });

    let preserved = generate_types(&value, None);
    assert_eq!(preserved.source_code.matches("interface Info {").count(), 2);

    let options = SynthesisOptions {
        name_collisions: NameCollisionPolicy::Suffix,
        ..Default::default()
    };
    let suffixed = generate_types_with(&value, None, &options);
    assert_eq!(suffixed.source_code.matches("interface Info {").count(), 1);
    assert!(suffixed.source_code.contains("interface Info2 {"));
    assert!(suffixed.source_code.contains("  info: Info2;"));
}

#[test]
fn invalid_json_is_an_input_error() {
    let err = process_json_input("{\"a\": ", None).unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON: "), "{err}");

    let ok = process_json_input(r#"{"a": [1, "b"]}"#, Some("Thing")).unwrap();
    assert_eq!(ok.source_code, "interface Thing {\n  a: (number | string)[];\n}");
}

#[test]
fn scalar_roots_degrade() {
    let out: GeneratedTypes = generate_types(&json!("just text"), None);
    assert_eq!(
        out.source_code,
        "// Error generating types: unsupported root value: expected an object or an array of objects, got string"
    );
    assert_eq!(tokenize(&out.source_code).len(), 1);
}
