//! Test suite for the translation engine
//!
//! End-to-end checks over whole documents:
//! - Functions, classes and inheritance
//! - Block nesting and continuation headers
//! - Exception handling
//! - Comprehensions and interpolated strings
//! - Entry guard synthesis
//! - Diagnostics

use crate::{translate, translate_with, DiagnosticKind, TranslateOptions, Translation};

fn bare(source: &str) -> Translation {
    let options = TranslateOptions {
        prelude: false,
        ..TranslateOptions::default()
    };
    translate_with(source, &options)
}

fn kinds(t: &Translation) -> Vec<DiagnosticKind> {
    t.diagnostics.iter().map(|d| d.kind).collect()
}

//===========================================================================
// FUNCTIONS AND CLASSES
//===========================================================================

#[test]
fn test_simple_function() {
    let out = bare("def add(a, b):\n    return a + b\n");
    assert_eq!(out.text, "auto add(auto a, auto b) {\n    return a + b;\n}\n");
    assert!(out.diagnostics.is_empty());
}

#[test]
fn test_typed_function() {
    let out = bare("def area(r: float) -> float:\n    return 3.14 * r * r\n");
    assert!(out.text.contains("double area(double r) {"));
    assert!(out.text.contains("return 3.14 * r * r;"));
}

#[test]
fn test_inheritance_initializer() {
    let src = "\
class Animal:
    def __init__(self, name):
        self.name = name

class Dog(Animal):
    def __init__(self, name):
        super().__init__(name)
";
    let out = bare(src);
    insta::assert_snapshot!(out.text, @r#"
    class Animal {
    public:
        Animal(auto name) {
            this->name = name;
        }
    };

    class Dog : public Animal {
    public:
        Dog(auto name) {
            Animal::__init__(name);
        }
    };
    "#);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn test_super_without_base_is_reported() {
    let src = "class Dog:\n    def __init__(self):\n        super().__init__()\n";
    let out = bare(src);
    assert!(out.text.contains("super().__init__();"));
    assert_eq!(kinds(&out), vec![DiagnosticKind::UndefinedBaseClassReference]);
    assert_eq!(out.diagnostics[0].line, 3);
}

#[test]
fn test_methods_and_attributes() {
    let src = "\
class Counter:
    def __init__(self):
        self.count = 0

    def bump(self, by: int = 1) -> int:
        self.count += by
        return self.count
";
    let out = bare(src);
    assert!(out.text.contains("    Counter() {"));
    assert!(out.text.contains("        this->count = 0;"));
    assert!(out.text.contains("    int bump(int by = 1) {"));
    assert!(out.text.contains("        this->count += by;"));
    assert!(out.text.ends_with("    }\n};\n"));
}

#[test]
fn test_declared_class_as_annotation() {
    let src = "class Node:\n    pass\n\ndef head(items: list[Node]) -> Node:\n    return items[0]\n";
    let out = bare(src);
    assert!(out.text.contains("Node head(std::vector<Node> items) {"));
}

//===========================================================================
// BLOCK STRUCTURE
//===========================================================================

#[test]
fn test_conditional_chain() {
    let src = "\
def sign(n):
    if n > 0:
        return 1
    elif n < 0:
        return -1
    else:
        return 0
";
    let out = bare(src);
    insta::assert_snapshot!(out.text, @r#"
    auto sign(auto n) {
        if (n > 0) {
            return 1;
        } else if (n < 0) {
            return -1;
        } else {
            return 0;
        }
    }
    "#);
}

#[test]
fn test_closers_match_dedent() {
    let src = "\
def walk(grid):
    for row in grid:
        for cell in row:
            if cell:
                print(cell)
    return None
";
    let out = bare(src);
    let lines: Vec<&str> = out.text.lines().collect();
    let ret = lines.iter().position(|l| l.contains("return nullptr;")).unwrap();
    let print = lines.iter().position(|l| l.contains("std::cout")).unwrap();
    let closers = lines[print + 1..ret].iter().filter(|l| l.trim() == "}").count();
    assert_eq!(closers, 3);
}

#[test]
fn test_blank_lines_are_kept() {
    let out = bare("x = 1\n\ny = 2\n");
    assert!(out.text.starts_with("x = 1;\n\ny = 2;\n"));
}

#[test]
fn test_blank_line_follows_closer() {
    let out = bare("def f():\n    return 1\n\ndef g():\n    return 2\n");
    assert!(out.text.contains("    return 1;\n}\n\nauto g() {"));
}

#[test]
fn test_while_loop_with_break() {
    let out = bare("def spin():\n    while True:\n        break\n");
    assert!(out.text.contains("    while (true) {\n        break;\n    }"));
}

#[test]
fn test_range_loop() {
    let out = bare("def count(n):\n    for i in range(1, n + 1):\n        print(i)\n");
    assert!(out.text.contains("for (int i = 1; i < n + 1; ++i) {"));
    assert!(out.text.contains("std::cout << i << std::endl;"));
}

#[test]
fn test_orphan_else() {
    let out = bare("else:\n    x = 1\n");
    assert!(out.text.starts_with("else {\n    x = 1;\n}\n"));
    assert_eq!(kinds(&out), vec![DiagnosticKind::OrphanContinuation]);
}

#[test]
fn test_unterminated_scope() {
    let out = bare("def stub():\n");
    assert!(out.text.starts_with("auto stub() {\n}\n"));
    assert_eq!(kinds(&out), vec![DiagnosticKind::UnterminatedScope]);
    assert_eq!(out.diagnostics[0].line, 1);
}

//===========================================================================
// EXCEPTIONS
//===========================================================================

#[test]
fn test_try_loop_raise_handler() {
    let src = "\
def check(values):
    try:
        for v in values:
            if v < 0:
                raise ValueError(\"negative\")
    except ValueError as e:
        print(\"Error:\", e)
";
    let out = bare(src);
    insta::assert_snapshot!(out.text, @r#"
    auto check(auto values) {
        try {
            for (const auto& v : values) {
                if (v < 0) {
                    throw std::invalid_argument("negative");
                }
            }
        } catch (const std::invalid_argument& e) {
            std::cout << "Error:" << " " << e << std::endl;
        }
    }
    "#);
}

#[test]
fn test_multiple_handlers_and_finally() {
    let src = "\
def load(path):
    try:
        data = read(path)
    except KeyError:
        data = None
    except:
        raise
    finally:
        close(path)
";
    let out = bare(src);
    assert!(out.text.contains("    } catch (const std::out_of_range& e) {"));
    assert!(out.text.contains("    } catch (...) {\n        throw;\n    }"));
    assert!(out.text.contains("    // finally\n    close(path);"));
}

//===========================================================================
// EXPRESSIONS
//===========================================================================

#[test]
fn test_list_comprehension_return() {
    let out = bare("def squares(numbers):\n    return [x*x for x in numbers]\n");
    assert!(out.text.contains(
        "return [&]() { std::vector<auto> result; for (const auto& x : numbers) { result.push_back(x*x); } return result; }();"
    ));
}

#[test]
fn test_interpolated_print() {
    let out = bare("def greet(name):\n    print(f\"Hello {name}!\")\n");
    assert!(out
        .text
        .contains("std::cout << \"Hello \" << name << \"!\" << std::endl;"));
}

#[test]
fn test_operators_and_constants() {
    let out = bare("def ok(a, b):\n    return a is not None and not b\n");
    assert!(out.text.contains("return a != nullptr && !b;"));
}

#[test]
fn test_identifier_named_not_in_survives() {
    let out = bare("not_in = 1\n");
    assert!(out.text.starts_with("not_in = 1;\n"));
}

#[test]
fn test_literals_are_not_rewritten() {
    let out = bare("def f():\n    print(\"not True and self.x\")\n");
    assert!(out
        .text
        .contains("std::cout << \"not True and self.x\" << std::endl;"));
}

#[test]
fn test_tuple_return_and_len() {
    let out = bare("def stats(xs):\n    return len(xs), sum(xs)\n");
    assert!(out.text.contains("return std::make_tuple(xs.size(), sum(xs));"));
}

#[test]
fn test_comments_and_imports() {
    let out = bare("import math\n# helpers\ndef f():\n    pass  # nothing yet\n");
    assert!(out.text.contains("// import math\n// helpers\n"));
    assert!(out.text.contains("    // pass // nothing yet"));
}

//===========================================================================
// ENTRY GUARD
//===========================================================================

#[test]
fn test_entry_guard_synthesizes_main() {
    let out = bare("if __name__ == \"__main__\":\n    x = 1\n    print(x)\n");
    insta::assert_snapshot!(out.text, @r#"
    int main() {
        x = 1;
        std::cout << x << std::endl;
        return 0;
    }
    "#);
}

#[test]
fn test_entry_guard_keeps_blank_lines() {
    let src = "if __name__ == \"__main__\":\n    a = 1\n\n    b = 2\n";
    let out = bare(src);
    assert_eq!(out.text, "int main() {\n    a = 1;\n\n    b = 2;\n    return 0;\n}\n");
    let blanks = |text: &str| text.lines().filter(|l| l.trim().is_empty()).count();
    assert_eq!(blanks(&out.text), blanks(src));
}

#[test]
fn test_entry_guard_after_function() {
    let src = "def run():\n    return 0\n\nif __name__ == '__main__':\n    run()\n";
    let out = bare(src);
    assert!(out.text.contains("auto run() {\n    return 0;\n}\n\nint main() {\n    run();\n    return 0;\n}\n"));
}

#[test]
fn test_custom_entry_function() {
    let options = TranslateOptions {
        prelude: false,
        entry_function: "entry".to_string(),
    };
    let out = translate_with("if __name__ == \"__main__\":\n    go()\n", &options);
    assert!(out.text.starts_with("int entry() {"));
}

#[test]
fn test_top_level_after_guard_is_discarded() {
    let src = "if __name__ == \"__main__\":\n    run()\ncleanup()\n# end\n";
    let out = bare(src);
    assert!(!out.text.contains("cleanup"));
    assert!(out.text.contains("// end"));
    assert_eq!(kinds(&out), vec![DiagnosticKind::DiscardedAfterEntryGuard]);
    assert_eq!(out.diagnostics[0].line, 3);
}

#[test]
fn test_nested_guard_block_is_flattened() {
    let src = "if __name__ == \"__main__\":\n    for a in args:\n        use(a)\n";
    let out = bare(src);
    assert!(out.text.contains("    for (const auto& a : args) {\n    }\n    use(a);\n"));
    assert_eq!(kinds(&out), vec![DiagnosticKind::FlattenedEntryBlock]);
}

#[test]
fn test_empty_document_gets_minimal_main() {
    let out = bare("");
    assert_eq!(out.text, "int main() {\n    return 0;\n}\n");
}

//===========================================================================
// OPTIONS AND CONCURRENCY
//===========================================================================

#[test]
fn test_prelude_is_default() {
    let out = translate("def f():\n    return 1\n");
    assert!(out.text.starts_with("#include <iostream>\n#include <string>\n"));
    assert!(out.text.contains("#include <algorithm>\n\nauto f() {"));
}

#[test]
fn test_parallel_translations_are_independent() {
    let sources = [
        "class A:\n    pass\nclass B(A):\n    def __init__(self):\n        super().__init__()\n",
        "class C:\n    def __init__(self):\n        super().__init__()\n",
        "if __name__ == \"__main__\":\n    print(1)\n",
    ];
    let expected: Vec<Translation> = sources.iter().map(|s| translate(s)).collect();

    let results: Vec<Translation> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|s| scope.spawn(move || translate(s)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
    assert!(results[0].diagnostics.is_empty());
    assert_eq!(results[1].diagnostics.len(), 1);
}
