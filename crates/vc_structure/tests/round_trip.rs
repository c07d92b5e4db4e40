use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, Ordering};

use vc_structure::info::TypeDescriptor;
use vc_structure::typed::Bytes;
use vc_structure::{Converter, ConverterConfig, Native, UnstructureStrategy, Value, impl_record};

#[derive(Debug, Clone, PartialEq)]
struct Line {
    sku: String,
    quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: i64,
    lines: Vec<Line>,
    tags: BTreeSet<String>,
    prices: BTreeMap<String, f64>,
    position: (i32, i32),
    note: Option<String>,
    payload: Bytes,
}

impl_record!(Line { sku: String, quantity: u32 });

impl_record!(Order {
    id: i64,
    lines: Vec<Line>,
    tags: BTreeSet<String>,
    prices: BTreeMap<String, f64>,
    position: (i32, i32),
    note: Option<String> = None,
    payload: Bytes = Bytes::default(),
});

fn sample_order() -> Order {
    Order {
        id: 42,
        lines: vec![
            Line { sku: "apple".into(), quantity: 3 },
            Line { sku: "pear".into(), quantity: 1 },
        ],
        tags: ["fresh".to_string(), "fruit".to_string()].into_iter().collect(),
        prices: [("apple".to_string(), 0.5), ("pear".to_string(), 0.75)]
            .into_iter()
            .collect(),
        position: (-1, 7),
        note: Some("leave at door".into()),
        payload: Bytes(vec![0, 255]),
    }
}

#[test]
fn record_round_trip() {
    let converter = Converter::new();
    let order = sample_order();

    let wire = converter.unstructure_from(&order);
    let back: Order = converter.structure_as(&wire).unwrap();
    assert_eq!(back, order);
}

#[test]
fn record_round_trip_through_json() {
    let converter = Converter::new();
    let mut order = sample_order();
    order.payload = Bytes::default();

    // JSON has no byte strings; leave the field to its default.
    let mut wire = converter.unstructure_from(&order);
    if let Value::Map(map) = &mut wire {
        map.shift_remove(&Value::from("payload"));
    }

    let json = serde_json::to_string(&wire).unwrap();
    let wire: Value = serde_json::from_str(&json).unwrap();

    let back: Order = converter.structure_as(&wire).unwrap();
    assert_eq!(back, order);
}

#[test]
fn unstructured_shape() {
    let converter = Converter::new();
    let line = Line { sku: "fig".into(), quantity: 2 };

    assert_eq!(
        converter.unstructure_from(&line),
        Value::map([("sku", Value::from("fig")), ("quantity", Value::from(2))]),
    );
    assert_eq!(
        converter.unstructure_from(&(1_i64, "x".to_string())),
        Value::seq([Value::from(1), Value::from("x")]),
    );
}

#[test]
fn missing_defaulted_fields_take_defaults() {
    let converter = Converter::new();
    let mut wire = converter.unstructure_from(&sample_order());
    let Value::Map(map) = &mut wire else {
        panic!("records unstructure to maps");
    };
    map.shift_remove(&Value::from("note"));
    map.shift_remove(&Value::from("payload"));

    let order: Order = converter.structure_as(&wire).unwrap();
    assert_eq!(
        order,
        Order {
            note: None,
            payload: Bytes::default(),
            ..sample_order()
        }
    );
}

static NEXT_TICKET: AtomicI64 = AtomicI64::new(1);

fn next_ticket() -> i64 {
    NEXT_TICKET.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq)]
struct Ticket {
    owner: String,
    number: i64,
    history: Vec<String>,
}

impl_record!(Ticket {
    owner: String,
    number: i64 = next_ticket(),
    history: Vec<String> = Vec::new(),
});

#[test]
fn factory_defaults_run_for_each_value() {
    let converter = Converter::new();
    let wire = Value::map([("owner", "ana")]);

    let first: Ticket = converter.structure_as(&wire).unwrap();
    let second: Ticket = converter.structure_as(&wire).unwrap();
    assert_ne!(first.number, second.number);
    assert!(first.history.is_empty());

    let given: Ticket = converter
        .structure_as(&Value::map([("owner", Value::from("bo")), ("number", Value::from(-5))]))
        .unwrap();
    assert_eq!(given.number, -5);
}

#[test]
fn tuple_hook_round_trip() {
    let mut converter = Converter::new();
    converter.register_structure_hook(
        TypeDescriptor::record::<Line>(),
        Converter::structure_record_from_seq,
    );
    converter.register_unstructure_hook(
        TypeDescriptor::record::<Line>(),
        Converter::unstructure_record_as_seq,
    );

    let line = Line { sku: "kiwi".into(), quantity: 9 };
    let wire = converter.unstructure_from(&line);
    assert_eq!(wire, Value::seq([Value::from("kiwi"), Value::from(9)]));
    assert_eq!(converter.structure_as::<Line>(&wire).unwrap(), line);

    let order = sample_order();
    let back: Order = converter.structure_as(&converter.unstructure_from(&order)).unwrap();
    assert_eq!(back, order);
}

#[test]
fn seq_strategy_round_trip() {
    let config = ConverterConfig::new().with_unstructure_strategy(UnstructureStrategy::AsSeq);
    let converter = Converter::with_config(config);
    let order = sample_order();

    let wire = converter.unstructure_from(&order);
    assert!(matches!(wire, Value::Seq(ref fields) if fields.len() == 7));
    assert_eq!(converter.structure_as::<Order>(&wire).unwrap(), order);
}

#[test]
fn sequence_order_is_preserved() {
    let converter = Converter::new();
    let ty = TypeDescriptor::seq(TypeDescriptor::INT);
    let wire = Value::seq([3, 1, 2]);

    let native = converter.structure(&wire, &ty).unwrap();
    assert_eq!(converter.unstructure(&native), wire);
    assert_eq!(converter.unstructure_as(&native, &ty), wire);
}

#[test]
fn set_keeps_elements() {
    let converter = Converter::new();
    let ty = TypeDescriptor::set(TypeDescriptor::INT);

    let native = converter.structure(&Value::seq([3, 1, 2, 3]), &ty).unwrap();
    assert_eq!(converter.unstructure(&native), Value::set([1, 2, 3]));

    let set: BTreeSet<i64> = converter.structure_as(&Value::set([2, 9])).unwrap();
    assert_eq!(set, BTreeSet::from([2, 9]));
}

#[test]
fn primitives_unstructure_unchanged() {
    let converter = Converter::new();
    let values = [
        Value::Null,
        Value::Bool(false),
        Value::Int(-3),
        Value::Float(f64::NAN),
        Value::Float(-0.0),
        Value::from("text"),
        Value::Bytes(vec![1, 2]),
    ];

    for value in values {
        assert_eq!(converter.unstructure(&Native::from_wire(&value)), value);
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    label: String,
    children: Vec<Tree>,
}

impl_record!(Tree {
    label: String,
    children: Vec<Tree> = Vec::new(),
});

#[test]
fn recursive_record_round_trip() {
    let converter = Converter::new();
    let tree = Tree {
        label: "root".into(),
        children: vec![
            Tree { label: "a".into(), children: Vec::new() },
            Tree {
                label: "b".into(),
                children: vec![Tree { label: "c".into(), children: Vec::new() }],
            },
        ],
    };

    let wire = converter.unstructure_from(&tree);
    assert_eq!(converter.structure_as::<Tree>(&wire).unwrap(), tree);
}
