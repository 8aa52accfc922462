/// binds three struct fields to JSON attributes & decodes the first CLI argument into them

use json_bind::JsonBinder;

struct Obj {
    text: String,
    boolean: bool,
    number: i64,
}

fn main() {
    let input = std::env::args().nth(1).unwrap_or_else(|| {
        String::from(r#"{"text":"hello","boolean":true,"number":42}"#)
    });

    let mut obj = Obj {
        text: String::new(),
        boolean: false,
        number: 0,
    };

    let mut binder = JsonBinder::with_capacity(3);
    binder.bind_string("text", &mut obj.text, 20).unwrap();
    binder.bind_boolean("boolean", &mut obj.boolean).unwrap();
    binder.bind_integer("number", &mut obj.number).unwrap();

    // the table is consumed by parse & released whether or not parsing succeeds
    if let Err(failure) = binder.finish().parse(&input) {
        eprintln!("error: {}", failure);
        std::process::exit(1);
    }

    println!("text    : {}", obj.text);
    println!("number  : {}", obj.number);
    println!("boolean : {}", obj.boolean);
}
