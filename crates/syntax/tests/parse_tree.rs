//! End-to-end coverage: source text in, navigated tree or pinned error out.

use pretty_assertions::assert_eq;
use syntax::{AccessError, Decimal};
use test_utils::{parse_str_err, parse_str_ok};

fn decimal(text: &str) -> Decimal {
    text.parse().unwrap()
}

#[test]
fn integer_literals() -> Result<(), AccessError> {
    let pt = parse_str_ok("11");
    assert_eq!(*pt.at(0)?.at(0)?.as_number()?, decimal("11"));
    Ok(())
}

#[test]
fn binary_literals() -> Result<(), AccessError> {
    let pt = parse_str_ok("0b11");
    assert_eq!(*pt.at(0)?.at(0)?.as_number()?, decimal("3"));
    Ok(())
}

#[test]
fn fraction_literals_compare_scale_free() -> Result<(), AccessError> {
    let pt = parse_str_ok("11.500");
    assert_eq!(*pt.at(0)?.at(0)?.as_number()?, decimal("11.50"));
    Ok(())
}

#[test]
fn long_literals_keep_every_digit() -> Result<(), AccessError> {
    let large = "7750231786409182364578901326401623401236478102635071238641920384761902384";
    let pt = parse_str_ok(large);
    assert_eq!(*pt.at(0)?.at(0)?.as_number()?, decimal(large));

    let fractional =
        "7750231786409182364578901326401623401236478102635071238641920384761902384.0000022384716239784";
    let pt = parse_str_ok(fractional);
    assert_eq!(*pt.at(0)?.at(0)?.as_number()?, decimal(fractional));
    Ok(())
}

#[test]
fn quoted_strings_hold_spaces() -> Result<(), AccessError> {
    let pt = parse_str_ok(r#""hello world""#);
    assert_eq!(pt.at(0)?.at(0)?.as_string()?, "hello world");
    Ok(())
}

#[test]
fn unquoted_words_are_separate_names() -> Result<(), AccessError> {
    let pt = parse_str_ok("hello world");
    assert_eq!(pt.at(0)?.at(0)?.as_name()?, "hello");
    assert_eq!(pt.at(0)?.at(1)?.as_name()?, "world");
    Ok(())
}

#[test]
fn tagged_entries_at_the_root() -> Result<(), AccessError> {
    let pt = parse_str_ok("hello: world");
    assert_eq!(pt.get("hello")?.at(0)?.as_name()?, "world");

    let pt = parse_str_ok(r#"hello: "world","#);
    assert_eq!(pt.get("hello")?.at(0)?.as_string()?, "world");
    Ok(())
}

#[test]
fn escaped_and_interpreted_views() -> Result<(), AccessError> {
    let pt = parse_str_ok(r#""six\n""#);
    assert_eq!(pt.at(0)?.at(0)?.as_string()?, "six\n");
    assert_eq!(pt.at(0)?.at(0)?.as_escaped_string()?, r"six\n");
    Ok(())
}

#[test]
fn nested_tuple_structure() -> Result<(), AccessError> {
    let source = r#"
        [
            one: two three,
            four: [5, ["six\n"]],
            7,8,["nine"]
        ],
        "ten",
    "#;
    let pt = parse_str_ok(source);

    let outer = pt.at(0)?.at(0)?;
    assert_eq!(outer.get("one")?.at(0)?.as_name()?, "two");
    assert_eq!(outer.get("one")?.at(1)?.as_name()?, "three");
    assert_eq!(*outer.get("four")?.at(0)?.at(0)?.at(0)?.as_number()?, decimal("5"));
    assert_eq!(
        outer.get("four")?.at(0)?.at(1)?.at(0)?.at(0)?.at(0)?.as_escaped_string()?,
        r"six\n"
    );
    assert_eq!(*outer.at(2)?.at(0)?.as_number()?, decimal("7"));
    assert_eq!(*outer.at(3)?.at(0)?.as_number()?, decimal("8"));
    assert_eq!(outer.at(4)?.at(0)?.at(0)?.at(0)?.as_string()?, "nine");
    assert_eq!(pt.at(1)?.at(0)?.as_string()?, "ten");
    Ok(())
}

#[test]
fn names_and_positions_are_interchangeable() -> Result<(), AccessError> {
    let source = r#"
        "zero",
        "one",
        two: "two",
        three: "three",
        four: [[]],
    "#;
    let pt = parse_str_ok(source);

    assert_eq!(pt.at(0)?.at(0)?.as_string()?, "zero");
    assert_eq!(pt.at(1)?.at(0)?.as_string()?, "one");
    assert_eq!(pt.at(2)?.at(0)?.as_string()?, "two");
    assert_eq!(pt.at(3)?.at(0)?.as_string()?, "three");

    assert_eq!(pt.get("two")?.at(0)?.as_string()?, "two");
    assert_eq!(pt.get("three")?.at(0)?.as_string()?, "three");

    for (position, expected) in [("0", "zero"), ("1", "one"), ("2", "two"), ("3", "three")] {
        assert_eq!(pt.get(position)?.at(0)?.as_string()?, expected);
    }

    assert!(pt.get("four")?.at(0)?.at(0)?.at(0)?.is_empty_tuple());
    Ok(())
}

#[test]
fn numeric_tags_are_stored_as_decimal_text() -> Result<(), AccessError> {
    let pt = parse_str_ok(r#"a, b, c, 2: "x""#);
    // the literal name wins over the positional alias
    assert_eq!(pt.get("2")?.at(0)?.as_string()?, "x");
    assert_eq!(pt.at(2)?.at(0)?.as_name()?, "c");

    let pt = parse_str_ok("0b11: x");
    assert_eq!(pt.get("3")?.at(0)?.as_name()?, "x");
    Ok(())
}

#[test]
fn duplicate_names_resolve_to_the_first_entry() -> Result<(), AccessError> {
    let pt = parse_str_ok("x: 1, x: 2");
    assert_eq!(pt.len(), 2);
    assert_eq!(*pt.get("x")?.at(0)?.as_number()?, decimal("1"));
    Ok(())
}

#[test]
fn empty_entries_are_dropped() -> Result<(), AccessError> {
    let pt = parse_str_ok("[ , , 20 ]");
    let tuple = pt.at(0)?.at(0)?;
    assert_eq!(tuple.len(), 1);
    assert_eq!(*tuple.at(0)?.at(0)?.as_number()?, decimal("20"));
    Ok(())
}

#[test]
fn comment_only_and_tag_only_entries_are_dropped() -> Result<(), AccessError> {
    let source = "[\n    , (ignored, as no statement under it)\n    twenty: ,(ignored, as no statement under it)\n    20 (first actual statement in the tuple)\n]\n";
    let pt = parse_str_ok(source);
    let tuple = pt.at(0)?.at(0)?;
    assert_eq!(tuple.len(), 1);
    assert_eq!(*tuple.at(0)?.at(0)?.as_number()?, decimal("20"));
    Ok(())
}

#[test]
fn empty_entries_are_dropped_inside_nested_tuples() -> Result<(), AccessError> {
    let pt = parse_str_ok("[\n    one,\n    [,\n    two,]\n]");
    assert_eq!(pt.at(0)?.at(0)?.at(1)?.at(0)?.at(0)?.at(0)?.as_name()?, "two");

    let pt = parse_str_ok("[\n    one,\n    [[],\n    two,]\n]");
    assert_eq!(pt.at(0)?.at(0)?.at(1)?.at(0)?.at(1)?.at(0)?.as_name()?, "two");
    Ok(())
}

#[test]
fn string_tags_are_rejected_where_they_stand() {
    let source = "\"zero\",\n\"one\",\n\"two\": \"two\",\nthree: \"three\",\n";
    assert_eq!(
        parse_str_err(source),
        "unexpected tag in tuple at: (file: test.txt line: 3 column: 1)"
    );
}

#[test]
fn tags_after_the_statement_started_are_rejected() {
    // "one" and "two" juxtapose into one statement; "two" then tries to tag
    let source = "\"zero\",\n\"one\"\n\"two\": \"two\",\nthree: \"three\",\n";
    assert_eq!(
        parse_str_err(source),
        "unexpected tag in tuple at: (file: test.txt line: 3 column: 1)"
    );
}

#[test]
fn stray_colons_are_rejected_where_they_stand() {
    assert_eq!(
        parse_str_err(", : x"),
        "statement did not expect a colon at: (file: test.txt line: 1 column: 3)"
    );
    assert_eq!(
        parse_str_err("a: [1] : 2"),
        "statement did not expect a colon at: (file: test.txt line: 1 column: 8)"
    );
}

#[test]
fn unterminated_tuples_report_the_opening_bracket() {
    let source = "\n[\n    one,\n    [,\n    two,\n]\n";
    assert_eq!(
        parse_str_err(source),
        "tuple did not end at: (file: test.txt line: 2 column: 1)"
    );
}

#[test]
fn stray_closing_brackets_report_their_own_position() {
    assert_eq!(
        parse_str_err("[one],]"),
        "tuple too many closing braces at: (file: test.txt line: 1 column: 7)"
    );
}

#[test]
fn lex_failures_surface_with_locations() {
    assert_eq!(
        parse_str_err("\"abc"),
        "unterminated string at: (file: test.txt line: 1 column: 1)"
    );
    assert_eq!(
        parse_str_err("one (two"),
        "unterminated comment at: (file: test.txt line: 1 column: 5)"
    );
    assert_eq!(
        parse_str_err("12abc"),
        "malformed number literal at: (file: test.txt line: 1 column: 1)"
    );
}

#[test]
fn edits_on_a_clone_leave_the_original_alone() -> Result<(), AccessError> {
    let original = parse_str_ok("a: 1, b: 2");
    let mut copy = original.clone();

    copy.pop_front()?;
    let moved = copy.pop_back()?;
    copy.push_back(moved)?;
    assert_eq!(copy.len(), 1);

    assert_eq!(original.len(), 2);
    assert_eq!(*original.get("a")?.at(0)?.as_number()?, decimal("1"));
    assert_eq!(*original.get("b")?.at(0)?.as_number()?, decimal("2"));
    Ok(())
}

#[test]
fn only_contains_checks_every_entry_name() -> Result<(), AccessError> {
    let named = parse_str_ok("a: 1, b: 2");
    assert!(named.only_contains(&["a", "b", "c"])?);
    assert!(!named.only_contains(&["a"])?);

    let mixed = parse_str_ok("a: 1, 2");
    assert!(!mixed.only_contains(&["a"])?);
    Ok(())
}

#[test]
fn slices_and_ends_navigate_without_mutating() -> Result<(), AccessError> {
    let pt = parse_str_ok("a: 1, b: 2, c: 3");
    assert_eq!(pt.front()?, pt.at(0)?);
    assert_eq!(pt.back()?, pt.at(2)?);

    let tail = pt.slice_from(1)?;
    assert_eq!(tail.len(), 2);
    assert_eq!(*tail.get("b")?.at(0)?.as_number()?, decimal("2"));
    assert_eq!(pt.len(), 3);
    Ok(())
}
