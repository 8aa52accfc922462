/// demonstrates the capacity bound on string destinations

use json_bind::JsonBinder;

fn main() {
    const SERIALIZED_DATA: &str = r#"{"greeting":"hello world"}"#;

    let mut greeting = String::new();
    let mut binder = JsonBinder::new();
    binder.bind_string("greeting", &mut greeting, 5).unwrap();
    binder.finish().parse(SERIALIZED_DATA).unwrap();

    assert_eq!("hello", greeting);
    println!("stored {:?} from {}", greeting, SERIALIZED_DATA);
}
