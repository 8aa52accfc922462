/// demonstrates that unknown attributes are ignored & missing attributes leave their
/// destination untouched

use json_bind::JsonBinder;

fn main() {
    const SERIALIZED_DATA: &str = r#"{"seen":1,"unknown":{"nested":[true,null]}}"#;

    let mut seen = 0_i64;
    let mut missing = -1_i64;
    let mut binder = JsonBinder::new();
    binder.bind_integer("seen", &mut seen).unwrap();
    binder.bind_integer("missing", &mut missing).unwrap();
    binder.finish().parse(SERIALIZED_DATA).unwrap();

    assert_eq!(1, seen);
    assert_eq!(-1, missing);
    println!("seen = {}, missing kept its default {}", seen, missing);
}
