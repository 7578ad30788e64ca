use pretty_assertions::assert_eq;

use super::*;
use crate::value::Value;

#[test]
fn buffer_captures_lines_with_levels() {
    let console = buffer_console();
    console.write(ConsoleLevel::Log, "hello");
    console.write(ConsoleLevel::Warn, "careful");

    assert_eq!(console.output(), "hello\ncareful\n");
    assert_eq!(
        console.entries(),
        vec![
            ConsoleEntry {
                level: ConsoleLevel::Log,
                text: "hello".to_string()
            },
            ConsoleEntry {
                level: ConsoleLevel::Warn,
                text: "careful".to_string()
            },
        ]
    );
}

#[test]
fn clear_empties_buffer() {
    let console = buffer_console();
    console.write(ConsoleLevel::Info, "x");
    console.clear();
    assert!(console.output().is_empty());
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_console();
    silent.write(ConsoleLevel::Error, "dropped");
    assert_eq!(silent.output(), "");
    assert!(stdout_console().entries().is_empty());
}

#[test]
fn buffer_is_shareable_across_threads() {
    let console = buffer_console();
    let writer = console.clone();
    let handle = std::thread::spawn(move || {
        for _ in 0..50 {
            writer.write(ConsoleLevel::Log, "a");
        }
    });
    for _ in 0..50 {
        console.write(ConsoleLevel::Log, "b");
    }
    handle.join().unwrap();
    assert_eq!(console.entries().len(), 100);
}

#[test]
fn inspect_renders_containers() {
    let value = Value::object_from([
        ("a", Value::Number(1.0)),
        ("b", Value::array(vec![Value::string("x"), Value::Null])),
        ("two words", Value::Bool(true)),
    ]);
    assert_eq!(
        inspect(&value),
        "{ a: 1, b: [ 'x', null ], 'two words': true }"
    );
    assert_eq!(inspect(&Value::empty_object()), "{}");
    assert_eq!(inspect(&Value::array(vec![])), "[]");
}

#[test]
fn format_args_prints_strings_raw() {
    let args = [Value::string("count:"), Value::Number(3.0), Value::string("x")];
    assert_eq!(format_args(&args), "count: 3 x");
}
