use crate::core::{BridgeArena, BridgeRoot, Gc, JSObjectDataPtr, MutationContext, SymbolData, Value, new_js_object_data, object_get_key_value, object_set_key_value};

/// Build a fresh arena whose global scope carries the standard constructors.
pub fn new_bridge_arena() -> BridgeArena {
    BridgeArena::new(|mc| {
        let global_env = new_js_object_data(mc);
        initialize_standard_scope(mc, &global_env);
        BridgeRoot { global_env }
    })
}

/// Populate a scope with the minimal standard objects the bridge relies on:
/// `Object` and `Array` constructors with prototype objects, and the `Symbol`
/// constructor carrying the well-known symbols.
pub fn initialize_standard_scope<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) {
    let object_ctor = new_js_object_data(mc);
    let object_proto = new_js_object_data(mc);
    object_set_key_value(mc, &object_proto, "toString", Value::Function("Object.prototype.toString".to_string()));
    object_set_key_value(
        mc,
        &object_proto,
        "hasOwnProperty",
        Value::Function("Object.prototype.hasOwnProperty".to_string()),
    );
    object_set_key_value(mc, &object_ctor, "prototype", Value::Object(object_proto));
    object_set_key_value(mc, &object_proto, "constructor", Value::Object(object_ctor));
    object_set_key_value(mc, env, "Object", Value::Object(object_ctor));

    let array_ctor = new_js_object_data(mc);
    let array_proto = new_js_object_data(mc);
    array_proto.borrow_mut(mc).prototype = Some(object_proto);
    object_set_key_value(mc, &array_proto, "toString", Value::Function("Array.prototype.toString".to_string()));
    object_set_key_value(mc, &array_proto, "join", Value::Function("Array.prototype.join".to_string()));
    object_set_key_value(mc, &array_ctor, "prototype", Value::Object(array_proto));
    object_set_key_value(mc, &array_proto, "constructor", Value::Object(array_ctor));
    object_set_key_value(mc, env, "Array", Value::Object(array_ctor));

    let symbol_ctor = new_js_object_data(mc);
    for name in ["iterator", "isConcatSpreadable"] {
        let data = Gc::new(
            mc,
            SymbolData {
                description: Some(format!("Symbol.{name}")),
            },
        );
        object_set_key_value(mc, &symbol_ctor, name, Value::Symbol(data));
    }
    object_set_key_value(mc, env, "Symbol", Value::Object(symbol_ctor));
}

/// Look up a well-known symbol registered on the `Symbol` constructor in the
/// given scope chain. Identity of the returned pointer is what protocol
/// checks compare against.
pub fn well_known_symbol<'gc>(env: &JSObjectDataPtr<'gc>, name: &str) -> Option<Gc<'gc, SymbolData>> {
    let sym_ctor = object_get_key_value(env, "Symbol")?;
    let ctor_obj = match &*sym_ctor.borrow() {
        Value::Object(o) => *o,
        _ => return None,
    };
    let sym_val = object_get_key_value(&ctor_obj, name)?;
    match &*sym_val.borrow() {
        Value::Symbol(s) => Some(*s),
        _ => None,
    }
}
