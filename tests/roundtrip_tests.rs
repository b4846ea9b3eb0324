//! Round-trip stability: for any document, parse(serialize(doc, options))
//! reproduces the document under every formatting option combination.

use shon::{parse, to_string, to_string_with_options, Document, ShonOptions};

fn option_grid() -> Vec<ShonOptions> {
    let mut grid = Vec::new();
    for minify in [false, true] {
        for sort_keys in [false, true] {
            for compact_arrays in [false, true] {
                for trailing_commas in [false, true] {
                    for indent in [2, 4] {
                        grid.push(
                            ShonOptions::new()
                                .with_indent(indent)
                                .with_sort_keys(sort_keys)
                                .with_compact_arrays(compact_arrays)
                                .with_trailing_commas(trailing_commas)
                                .with_minify(minify),
                        );
                    }
                }
            }
        }
    }
    grid
}

fn assert_round_trips(doc: &Document) {
    for options in option_grid() {
        let rendered = to_string_with_options(doc, &options);
        let reparsed = parse(&rendered)
            .unwrap_or_else(|e| panic!("reparse failed with {options:?}: {e}\n{rendered}"));
        assert_eq!(&reparsed, doc, "options: {options:?}\nrendered:\n{rendered}");
    }
}

#[test]
fn rich_document_round_trips_under_every_option_combination() {
    let doc = parse(
        r#"$schema: "orders.shos"

@orders {
    $type: "order",
    records: [
        { id: 1, total: $decimal("1042.75"), status: &status.status_1 },
        { id: 2, total: $decimal("19.90"), status: &status.status_2 },
    ],
    exported: $timestamp("2025-03-22T14:45:00Z"),
    tags: ["bulk", "priority"],
    meta: {
        source: "import",
        counts: [1, 2, 3],
        nested: { deep: true },
    },
    empty_list: [],
    empty_obj: {},
    big: 123456789012345678901234567890,
    note: null,
}

@status {
    status_1: "open",
    status_2: "closed",
}
"#,
    )
    .unwrap();
    assert_round_trips(&doc);
}

#[test]
fn schema_only_document_round_trips() {
    let doc = parse("$schema: \"empty.shos\"").unwrap();
    assert_round_trips(&doc);
}

#[test]
fn key_order_is_invariant_without_sorting() {
    let doc = parse("@a { b: 1, a: 2, c: 3 }").unwrap();
    let out = to_string(&doc);
    let b = out.find("b: 1").unwrap();
    let a = out.find("a: 2").unwrap();
    let c = out.find("c: 3").unwrap();
    assert!(b < a && a < c);

    let sorted = to_string_with_options(&doc, &ShonOptions::new().with_sort_keys(true));
    let a = sorted.find("a: 2").unwrap();
    let b = sorted.find("b: 1").unwrap();
    let c = sorted.find("c: 3").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn compact_and_expanded_forms_parse_identically() {
    let expanded = r#"
@people {
    records: [
        {
            name: "Sean",
            title: "Engineer"
        },
        {
            name: "Darcy",
            title: "CTO"
        }
    ]
}
"#;
    let compact = r#"
@people {
    records: [
        { name: "Sean", title: "Engineer" },
        { name: "Darcy", title: "CTO" },
    ]
}
"#;
    assert_eq!(parse(expanded).unwrap(), parse(compact).unwrap());
}

#[test]
fn compact_rendering_is_purely_cosmetic() {
    let doc = parse(r#"@a { rows: [{ x: 1 }, { x: 2 }] }"#).unwrap();
    let compact = to_string_with_options(&doc, &ShonOptions::new().with_compact_arrays(true));
    let expanded = to_string_with_options(&doc, &ShonOptions::new());
    assert_ne!(compact, expanded);
    assert_eq!(parse(&compact).unwrap(), parse(&expanded).unwrap());
}

#[test]
fn comments_survive_reformatting_and_die_under_minify() {
    let source = "// ledger\n@books {\n    // owed\n    balance: $decimal(\"12.50\"),\n}\n// end\n";
    let doc = parse(source).unwrap();

    let pretty = to_string(&doc);
    assert!(pretty.contains("// ledger"));
    assert!(pretty.contains("// owed"));
    assert!(pretty.contains("// end"));
    // Reformatting with comments intact reparses to an equal document.
    assert_eq!(parse(&pretty).unwrap(), doc);

    let minified = to_string_with_options(&doc, &ShonOptions::minified());
    assert!(!minified.contains("//"));
}

#[test]
fn decimal_text_is_never_reformatted() {
    let doc = parse(r#"@a { v: $decimal("0.500") }"#).unwrap();
    for options in option_grid() {
        let out = to_string_with_options(&doc, &options);
        assert!(out.contains("$decimal(\"0.500\")"), "options: {options:?}");
    }
}

#[test]
fn minified_output_reparses_to_the_same_tree() {
    let source = r#"@cfg { a: [1, 2], b: { c: &x.y.z }, d: "e" } @x { y: { z: 1 } }"#;
    let doc = parse(source).unwrap();
    let min = shon::minify(source).unwrap();
    assert_eq!(min.lines().count(), 1);
    assert_eq!(parse(&min).unwrap(), doc);
}
