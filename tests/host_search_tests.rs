use js_hostarray::{
    ArrayIncludes, ArrayIndexOf, Converters, HostArray, HostType, HostValue, JSError, NativeHostArray, Value, get_property,
    new_bridge_arena, values_equal,
};
use num_bigint::BigInt;

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

#[test]
fn test_index_of_and_includes_basic() {
    let array = HostArray::of_ints(&[1, 2, 3]);
    let index_of = ArrayIndexOf::new(array.clone());
    let includes = ArrayIncludes::new(array);

    let found = index_of.call(&[Value::Number(2.0)]).unwrap();
    assert!(values_equal(&found, &Value::Number(1.0)));
    let missing = index_of.call(&[Value::Number(5.0)]).unwrap();
    assert!(values_equal(&missing, &Value::Number(-1.0)));

    assert!(matches!(includes.call(&[Value::Number(3.0)]).unwrap(), Value::Boolean(true)));
    assert!(matches!(includes.call(&[Value::Number(5.0)]).unwrap(), Value::Boolean(false)));
}

#[test]
fn test_index_of_strings() {
    let index_of = ArrayIndexOf::new(HostArray::of_strings(&["a", "b", "c"]));
    let found = index_of.call(&[Value::from("b")]).unwrap();
    assert!(values_equal(&found, &Value::Number(1.0)));
}

#[test]
fn test_negative_start_normalizes_by_argument_count() {
    // With two arguments a start of -1 becomes 1, so the scan skips index 0.
    let index_of = ArrayIndexOf::new(HostArray::of_ints(&[1, 2, 3]));
    let skipped = index_of.call(&[Value::Number(1.0), Value::Number(-1.0)]).unwrap();
    assert!(values_equal(&skipped, &Value::Number(-1.0)));
    let found = index_of.call(&[Value::Number(2.0), Value::Number(-1.0)]).unwrap();
    assert!(values_equal(&found, &Value::Number(1.0)));
}

#[test]
fn test_includes_takes_negative_start_literally() {
    let array = HostArray::of_ints(&[1, 2, 3]);
    let includes = ArrayIncludes::new(array.clone());
    let index_of = ArrayIndexOf::new(array);
    // includes scans from the top on a negative start, indexOf does not.
    assert!(matches!(
        includes.call(&[Value::Number(1.0), Value::Number(-1.0)]).unwrap(),
        Value::Boolean(true)
    ));
    let res = index_of.call(&[Value::Number(1.0), Value::Number(-1.0)]).unwrap();
    assert!(values_equal(&res, &Value::Number(-1.0)));
}

#[test]
fn test_start_beyond_length_finds_nothing() {
    let array = HostArray::of_ints(&[1, 2, 3]);
    let index_of = ArrayIndexOf::new(array.clone());
    let includes = ArrayIncludes::new(array);
    let res = index_of.call(&[Value::Number(3.0), Value::Number(5.0)]).unwrap();
    assert!(values_equal(&res, &Value::Number(-1.0)));
    assert!(matches!(
        includes.call(&[Value::Number(3.0), Value::Number(5.0)]).unwrap(),
        Value::Boolean(false)
    ));
}

#[test]
fn test_non_numeric_start_scans_from_zero() {
    let index_of = ArrayIndexOf::new(HostArray::of_ints(&[1, 2, 3]));
    let res = index_of.call(&[Value::Number(2.0), Value::from("x")]).unwrap();
    assert!(values_equal(&res, &Value::Number(1.0)));
}

#[test]
fn test_missing_argument_is_an_arity_error() {
    let array = HostArray::of_ints(&[1]);
    match ArrayIndexOf::new(array.clone()).call(&[]) {
        Err(JSError::ArityError { method }) => assert_eq!(method, "indexOf"),
        _ => panic!("expected ArityError"),
    }
    match ArrayIncludes::new(array).call(&[]) {
        Err(JSError::ArityError { method }) => assert_eq!(method, "includes"),
        _ => panic!("expected ArityError"),
    }
}

#[test]
fn test_incompatible_needle_never_matches() {
    let array = HostArray::of_ints(&[1, 2, 3]);
    let index_of = ArrayIndexOf::new(array.clone());
    let includes = ArrayIncludes::new(array);

    let res = index_of.call(&[Value::from("2")]).unwrap();
    assert!(values_equal(&res, &Value::Number(-1.0)));
    // A fractional number cannot equal any int element.
    let res = index_of.call(&[Value::Number(2.5)]).unwrap();
    assert!(values_equal(&res, &Value::Number(-1.0)));
    assert!(matches!(includes.call(&[Value::Boolean(true)]).unwrap(), Value::Boolean(false)));
}

#[test]
fn test_null_needle_in_reference_array() {
    let array = HostArray::new(HostType::Str, vec![HostValue::Str("a".to_string()), HostValue::Null]).unwrap();
    let found = ArrayIndexOf::new(array).call(&[Value::Null]).unwrap();
    assert!(values_equal(&found, &Value::Number(1.0)));
}

#[test]
fn test_nan_is_found_in_double_array() {
    let includes = ArrayIncludes::new(HostArray::of_doubles(&[1.5, f64::NAN]));
    assert!(matches!(includes.call(&[Value::Number(f64::NAN)]).unwrap(), Value::Boolean(true)));
}

#[test]
fn test_bigint_needle_in_long_array() {
    let big = 9_007_199_254_740_993_i64;
    let index_of = ArrayIndexOf::new(HostArray::of_longs(&[7, big]));
    let found = index_of.call(&[Value::BigInt(BigInt::from(big))]).unwrap();
    assert!(values_equal(&found, &Value::Number(1.0)));
}

#[test]
fn test_wrapped_array_needle_compares_structurally() {
    new_bridge_arena().mutate(|mc, root| {
        let outer = HostArray::new(
            HostType::Array(Box::new(HostType::Int)),
            vec![
                HostValue::Array(HostArray::of_ints(&[1, 2])),
                HostValue::Array(HostArray::of_ints(&[3, 4])),
            ],
        )
        .unwrap();
        // Structurally equal but backed by distinct storage.
        let needle = NativeHostArray::new(
            mc,
            &root.global_env,
            HostValue::Array(HostArray::of_ints(&[3, 4])),
            Converters::standard(),
        )
        .unwrap();
        let found = ArrayIndexOf::new(outer).call(&[Value::HostArray(needle)]).unwrap();
        assert!(values_equal(&found, &Value::Number(1.0)));
    });
}

#[test]
fn test_bound_method_through_property_lookup() {
    new_bridge_arena().mutate(|mc, root| {
        let value = HostValue::Array(HostArray::of_ints(&[1, 2, 3]));
        let bridge = NativeHostArray::new(mc, &root.global_env, value, Converters::standard()).unwrap();
        let method = match get_property(mc, &bridge, "indexOf").unwrap() {
            Value::HostMethod(m) => m,
            other => panic!("expected a bound method, got {:?}", other),
        };
        assert_eq!(method.name(), "indexOf");
        let found = method.call(&[Value::Number(2.0)]).unwrap();
        assert!(values_equal(&found, &Value::Number(1.0)));
    });
}
