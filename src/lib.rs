#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

use serde_json::{Map, Value};

/// the declared kind of a bound attribute value
#[derive(Debug,PartialEq,Eq,Clone,Copy)]
pub enum JsonKind {
    /// a JSON string, decoded into a bounded string buffer
    String,
    /// a JSON boolean
    Boolean,
    /// a JSON number with no fractional part, decoded as i64
    Integer,
}

impl Display for JsonKind {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        fmt.write_str(match self {
            JsonKind::String => "string",
            JsonKind::Boolean => "boolean",
            JsonKind::Integer => "integer",
        })
    }
}

/// a caller-owned memory location that receives a decoded value. the borrow is exclusive
/// and must outlive the parse call that writes through it.
#[derive(Debug)]
pub enum JsonDest<'dest> {
    /// a bounded string buffer - decoding never stores more than `capacity` bytes
    String {
        buffer: &'dest mut String,
        capacity: usize,
    },
    /// a boolean cell
    Boolean(&'dest mut bool),
    /// an integer cell
    Integer(&'dest mut i64),
}

impl <'dest> JsonDest<'dest> {
    /// get the declared kind of this destination
    pub const fn kind(&self) -> JsonKind {
        match self {
            JsonDest::String { .. } => JsonKind::String,
            JsonDest::Boolean(_) => JsonKind::Boolean,
            JsonDest::Integer(_) => JsonKind::Integer,
        }
    }
}

/// a single attribute-name-to-destination mapping within a binding table
#[derive(Debug)]
pub struct JsonBinding<'key,'dest> {
    pub key: &'key str,
    pub dest: JsonDest<'dest>,
}

impl <'key,'dest> JsonBinding<'key,'dest> {
    /// create a new binding with the given key & destination
    pub fn new(key: &'key str, dest: JsonDest<'dest>) -> Self {
        JsonBinding { key, dest }
    }

    /// convenience helper to create a new string binding
    pub fn string(key: &'key str, buffer: &'dest mut String, capacity: usize) -> Self {
        Self::new(key, JsonDest::String { buffer, capacity })
    }

    /// convenience helper to create a new boolean binding
    pub fn boolean(key: &'key str, cell: &'dest mut bool) -> Self {
        Self::new(key, JsonDest::Boolean(cell))
    }

    /// convenience helper to create a new integer binding
    pub fn integer(key: &'key str, cell: &'dest mut i64) -> Self {
        Self::new(key, JsonDest::Integer(cell))
    }
}

/// the various reasons appending a binding can be rejected
#[derive(Debug,PartialEq,Eq,Clone,Copy)]
pub enum JsonBindFailure {
    /// a binding with the same key already exists in the table
    DuplicateKey,
    /// a string binding declared a capacity of zero bytes
    ZeroStringCapacity,
}

impl Display for JsonBindFailure {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        fmt.write_str(match self {
            JsonBindFailure::DuplicateKey => "duplicate attribute key",
            JsonBindFailure::ZeroStringCapacity => "string capacity must be at least 1 byte",
        })
    }
}

/// the various reasons parsing into a binding table can fail
#[derive(Debug)]
pub enum JsonParseFailure {
    /// the decoder rejected the text as JSON
    Syntax(serde_json::Error),
    /// the text is valid JSON but the top level value is not an object
    NotAnObject {
        /// the kind of value found at the top level
        found: &'static str,
    },
    /// a bound attribute was present in the text with a value of the wrong kind
    KindMismatch {
        /// the key of the binding whose value had the wrong kind
        key: String,
        /// the kind the binding declared
        expected: JsonKind,
        /// the kind of value found in the text
        found: &'static str,
    },
}

impl Display for JsonParseFailure {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self {
            JsonParseFailure::Syntax(source) => write!(fmt, "invalid JSON: {}", source),
            JsonParseFailure::NotAnObject { found } => {
                write!(fmt, "expected a top level object, found {}", found)
            },
            JsonParseFailure::KindMismatch { key, expected, found } => {
                write!(fmt, "attribute {:?} expected a {} value, found {}", key, expected, found)
            },
        }
    }
}

/// JsonBinder is the append-only builder for a binding table. Bindings are appended one at
/// a time, each borrowing its destination exclusively, and the populated builder is sealed
/// into a parseable JsonBindings with JsonBinder::finish. The append position is state of
/// the individual builder, so independent tables can be populated concurrently on
/// different threads.
#[derive(Debug,Default)]
pub struct JsonBinder<'key,'dest> {
    bindings: Vec<JsonBinding<'key,'dest>>,
}

impl <'key,'dest> JsonBinder<'key,'dest> {

    /// create an empty builder
    pub const fn new() -> Self {
        JsonBinder { bindings: Vec::new() }
    }

    /// create an empty builder with space reserved for the given number of bindings. the
    /// table grows past the hint if more bindings are appended.
    pub fn with_capacity(bindings: usize) -> Self {
        JsonBinder { bindings: Vec::with_capacity(bindings) }
    }

    /// get the number of bindings appended so far
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// returns true if no bindings have been appended
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// attempt to append a binding - rejects a key already present in the table & a string
    /// destination with zero capacity
    pub fn bind(&mut self, binding: JsonBinding<'key,'dest>) -> Result<(),JsonBindFailure> {
        if let JsonDest::String { capacity: 0, .. } = binding.dest {
            return Err(JsonBindFailure::ZeroStringCapacity);
        }
        if self.bindings.iter().any(|existing| existing.key == binding.key) {
            return Err(JsonBindFailure::DuplicateKey);
        }
        self.bindings.push(binding);
        Ok(())
    }

    /// convenience helper to append a string binding. decoding writes at most `capacity`
    /// bytes into `buffer`, truncating on a character boundary.
    pub fn bind_string(&mut self, key: &'key str, buffer: &'dest mut String, capacity: usize) -> Result<(),JsonBindFailure> {
        self.bind(JsonBinding::string(key, buffer, capacity))
    }

    /// convenience helper to append a boolean binding
    pub fn bind_boolean(&mut self, key: &'key str, cell: &'dest mut bool) -> Result<(),JsonBindFailure> {
        self.bind(JsonBinding::boolean(key, cell))
    }

    /// convenience helper to append an integer binding
    pub fn bind_integer(&mut self, key: &'key str, cell: &'dest mut i64) -> Result<(),JsonBindFailure> {
        self.bind(JsonBinding::integer(key, cell))
    }

    /// seal the builder into a parseable table. no bindings can be appended afterwards.
    pub fn finish(self) -> JsonBindings<'key,'dest> {
        JsonBindings { bindings: self.bindings }
    }
}

/// JsonBindings is a sealed binding table, produced by JsonBinder::finish and consumed by
/// exactly one call to JsonBindings::parse. parse takes the table by value, so its memory
/// is released when parsing returns whether or not parsing succeeded, and reusing a
/// consumed table is a compile error.
#[derive(Debug)]
pub struct JsonBindings<'key,'dest> {
    bindings: Vec<JsonBinding<'key,'dest>>,
}

impl <'key,'dest> JsonBindings<'key,'dest> {

    /// get the number of bindings in the table
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// returns true if the table holds no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// attempt to decode a JSON object from the provided text & write the value of every
    /// bound attribute into its destination.
    ///
    /// attributes in the text without a binding are ignored. bound attributes missing from
    /// the text leave their destination untouched. if the same attribute appears more than
    /// once in the text the last occurrence wins. a bound attribute whose value has the
    /// wrong kind fails the parse; destinations dispatched before the failing attribute
    /// keep their decoded values.
    ///
    /// a consumed table cannot be parsed into again:
    /// ```compile_fail
    /// let mut number = 0_i64;
    /// let mut binder = json_bind::JsonBinder::new();
    /// binder.bind_integer("number", &mut number).unwrap();
    /// let bindings = binder.finish();
    /// bindings.parse(r#"{"number":1}"#).unwrap();
    /// bindings.parse(r#"{"number":2}"#).unwrap(); // use of moved value
    /// ```
    pub fn parse(mut self, data: &str) -> Result<(),JsonParseFailure> {
        let decoded: Value = serde_json::from_str(data).map_err(JsonParseFailure::Syntax)?;
        let object = match decoded {
            Value::Object(object) => object,
            other => return Err(JsonParseFailure::NotAnObject { found: value_kind_name(&other) }),
        };
        dispatch_json_object(&object, self.bindings.as_mut_slice())
    }
}

/// the core function that powers parsing in the JsonBindings API. It walks the key/value
/// pairs of an already-decoded object & dispatches each value to the binding with the
/// matching key, type-checking it against the declared kind before writing it through.
pub fn dispatch_json_object(object: &Map<String,Value>, bindings: &mut [JsonBinding<'_,'_>]) -> Result<(),JsonParseFailure> {
    for (key, value) in object {
        let binding = match bindings.iter_mut().find(|binding| binding.key == key.as_str()) {
            Some(binding) => binding,
            None => continue,
        };
        write_decoded_value(binding, value)?;
    }
    Ok(())
}

fn write_decoded_value(binding: &mut JsonBinding<'_,'_>, value: &Value) -> Result<(),JsonParseFailure> {
    match &mut binding.dest {
        JsonDest::String { buffer, capacity } => match value {
            Value::String(decoded) => {
                buffer.clear();
                buffer.push_str(clip_to_capacity(decoded, *capacity));
            },
            other => return Err(kind_mismatch(binding.key, JsonKind::String, other)),
        },
        JsonDest::Boolean(cell) => match value {
            Value::Bool(decoded) => **cell = *decoded,
            other => return Err(kind_mismatch(binding.key, JsonKind::Boolean, other)),
        },
        JsonDest::Integer(cell) => match value.as_i64() {
            Some(decoded) => **cell = decoded,
            None => return Err(kind_mismatch(binding.key, JsonKind::Integer, value)),
        },
    }
    Ok(())
}

fn kind_mismatch(key: &str, expected: JsonKind, found: &Value) -> JsonParseFailure {
    JsonParseFailure::KindMismatch {
        key: String::from(key),
        expected,
        found: value_kind_name(found),
    }
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_i64() => "integer",
        Value::Number(number) if number.is_u64() => "out-of-range integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// clip a decoded string to at most `capacity` bytes, landing on a character boundary
fn clip_to_capacity(decoded: &str, capacity: usize) -> &str {
    if decoded.len() <= capacity {
        return decoded;
    }
    let mut end = capacity;
    while !decoded.is_char_boundary(end) {
        end -= 1;
    }
    decoded.split_at(end).0
}

#[cfg(feature = "std")]
mod stdlib {
    extern crate std;
    use std::error::Error;

    use crate::{JsonBindFailure, JsonParseFailure};

    impl Error for JsonBindFailure {}

    impl Error for JsonParseFailure {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            match self {
                JsonParseFailure::Syntax(source) => Some(source),
                _ => None,
            }
        }
    }
}
