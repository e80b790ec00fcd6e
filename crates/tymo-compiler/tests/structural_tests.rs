use serde_json::json;
use tymo_compiler::arena::{TypeArena, TypeId};
use tymo_compiler::{
    CompilerOptions, IndexKeyType, IndexModel, PropertyModel, TypeData, TypeKind, TypeModel,
    TypeModelCompiler, classify,
};
use tymo_model::walk;

#[test]
fn object_properties_keep_declaration_order() {
    let mut arena = TypeArena::new();
    let a = arena.property("a", TypeId::STRING);
    let b = arena.optional_property("b", TypeId::NUMBER);
    let ty = arena.object(vec![a, b]);

    let model = classify(&arena, &ty);
    assert_eq!(
        model,
        TypeModel::new(TypeData::Object {
            props: vec![
                PropertyModel::new("a", false, TypeModel::string()),
                PropertyModel::new("b", true, TypeModel::number()),
            ],
        })
    );
    assert_eq!(
        model.to_json().unwrap(),
        json!({
            "kind": "object",
            "props": [
                { "name": "a", "optional": false, "kind": "string" },
                { "name": "b", "optional": true, "kind": "number" }
            ]
        })
    );
}

#[test]
fn empty_object() {
    let mut arena = TypeArena::new();
    let ty = arena.object(Vec::new());
    assert_eq!(
        classify(&arena, &ty).to_json().unwrap(),
        json!({ "kind": "object", "props": [] })
    );
}

#[test]
fn property_values_are_compiled_recursively() {
    let mut arena = TypeArena::new();
    let street = arena.property("street", TypeId::STRING);
    let address = arena.object(vec![street]);
    let home = arena.property("home", address);
    let person = arena.object(vec![home]);

    assert_eq!(
        classify(&arena, &person).to_json().unwrap(),
        json!({
            "kind": "object",
            "props": [{
                "name": "home",
                "optional": false,
                "kind": "object",
                "props": [{ "name": "street", "optional": false, "kind": "string" }]
            }]
        })
    );
}

#[test]
fn unresolved_property_declaration_uses_engine_default() {
    let mut arena = TypeArena::new();
    let ghost = arena.unresolved_property("ghost");
    let ty = arena.object(vec![ghost]);

    let model = classify(&arena, &ty);
    assert_eq!(model.data.props()[0].kind(), TypeKind::Any);
}

#[test]
fn both_index_signatures_use_string_value_type() {
    let mut arena = TypeArena::new();
    let ty = arena.object_with_index(Vec::new(), Some(TypeId::NUMBER), Some(TypeId::BOOLEAN));

    let model = classify(&arena, &ty);
    assert_eq!(
        model,
        TypeModel::new(TypeData::ObjectWithIndex {
            props: Vec::new(),
            index: IndexModel::new(IndexKeyType::StringOrNumber, TypeModel::number()),
        })
    );
    assert_eq!(
        model.to_json().unwrap(),
        json!({
            "kind": "objectWithIndex",
            "props": [],
            "index": {
                "kind": "index",
                "keyType": {
                    "kind": "union",
                    "types": [{ "kind": "string" }, { "kind": "number" }]
                },
                "valueType": { "kind": "number" }
            }
        })
    );
}

#[test]
fn single_index_signatures() {
    let mut arena = TypeArena::new();
    let name = arena.property("name", TypeId::STRING);
    let by_number = arena.object_with_index(Vec::new(), None, Some(TypeId::STRING));
    let by_string = arena.object_with_index(vec![name], Some(TypeId::UNKNOWN), None);

    assert_eq!(
        classify(&arena, &by_number),
        TypeModel::new(TypeData::ObjectWithIndex {
            props: Vec::new(),
            index: IndexModel::new(IndexKeyType::Number, TypeModel::string()),
        })
    );
    assert_eq!(
        classify(&arena, &by_string),
        TypeModel::new(TypeData::ObjectWithIndex {
            props: vec![PropertyModel::new("name", false, TypeModel::string())],
            index: IndexModel::new(IndexKeyType::String, TypeModel::new(TypeData::Unknown)),
        })
    );
}

#[test]
fn tuple_and_array_are_told_apart() {
    let mut arena = TypeArena::new();
    let pair = arena.tuple(vec![TypeId::STRING, TypeId::NUMBER]);
    let list = arena.array(TypeId::STRING);

    assert_eq!(
        classify(&arena, &pair),
        TypeModel::new(TypeData::Tuple {
            types: vec![TypeModel::string(), TypeModel::number()],
        })
    );
    assert_eq!(
        classify(&arena, &list),
        TypeModel::array(TypeModel::string())
    );
    assert_eq!(
        classify(&arena, &list).to_json().unwrap(),
        json!({ "kind": "array", "type": { "kind": "string" } })
    );
}

#[test]
fn nested_arrays() {
    let mut arena = TypeArena::new();
    let inner = arena.array(TypeId::NUMBER);
    let outer = arena.array(inner);

    assert_eq!(
        classify(&arena, &outer),
        TypeModel::array(TypeModel::array(TypeModel::number()))
    );
}

#[test]
fn empty_tuple_falls_back_to_object() {
    let mut arena = TypeArena::new();
    let unit = arena.tuple(Vec::new());
    assert_eq!(
        classify(&arena, &unit),
        TypeModel::new(TypeData::Object { props: Vec::new() })
    );
}

#[test]
fn other_generic_references_are_objects() {
    let mut arena = TypeArena::new();
    let promise = arena.reference("Promise", vec![TypeId::STRING]);
    let read_only = arena.reference("ReadonlyArray", vec![TypeId::STRING]);

    assert_eq!(classify(&arena, &promise).kind(), TypeKind::Object);
    assert_eq!(classify(&arena, &read_only).kind(), TypeKind::Object);
}

#[test]
fn union_and_intersection_keep_member_order() {
    let mut arena = TypeArena::new();
    let a = arena.string_literal("a");
    let union = arena.union(vec![TypeId::NUMBER, a, TypeId::NULL]);

    let id = arena.property("id", TypeId::STRING);
    let named = arena.object(vec![id]);
    let intersection = arena.intersection(vec![named, TypeId::NON_PRIMITIVE]);

    assert_eq!(
        classify(&arena, &union),
        TypeModel::union(vec![
            TypeModel::number(),
            TypeModel::string_literal("a"),
            TypeModel::new(TypeData::Null),
        ])
    );
    assert_eq!(
        classify(&arena, &intersection).to_json().unwrap(),
        json!({
            "kind": "intersection",
            "types": [
                {
                    "kind": "object",
                    "props": [{ "name": "id", "optional": false, "kind": "string" }]
                },
                { "kind": "nonPrimitive" }
            ]
        })
    );
}

#[test]
fn origins_point_back_at_handles() {
    let mut arena = TypeArena::new();
    let list = arena.array(TypeId::STRING);
    let items = arena.property("items", list);
    let ty = arena.object(vec![items]);

    let model = classify(&arena, &ty);
    let mut origins = Vec::new();
    walk(&model, &mut |node: &TypeModel<TypeId>| {
        origins.push(node.origin().copied());
        true
    });
    assert_eq!(
        origins,
        vec![Some(ty), Some(list), Some(TypeId::STRING)]
    );
}

#[test]
fn origins_can_be_omitted() {
    let mut arena = TypeArena::new();
    let list = arena.array(TypeId::STRING);

    let options = CompilerOptions::default().with_record_origin(false);
    let model = TypeModelCompiler::with_options(&arena, options).compile(&list);
    assert_eq!(model.origin(), None);
    assert!(matches!(
        &model.data,
        TypeData::Array { element } if element.origin().is_none()
    ));
}

#[test]
fn origins_never_reach_output() {
    let mut arena = TypeArena::new();
    let pair = arena.tuple(vec![TypeId::STRING, TypeId::BOOLEAN]);

    let with_origin = classify(&arena, &pair);
    let detached = with_origin.clone().detach();

    assert!(with_origin.origin().is_some());
    assert_eq!(
        with_origin.to_json_string().unwrap(),
        detached.to_json_string().unwrap()
    );
    assert_eq!(
        with_origin.to_json_string().unwrap(),
        with_origin.to_json_string().unwrap()
    );
}

#[test]
fn detach_clears_every_compiled_origin() {
    let mut arena = TypeArena::new();
    let list = arena.array(TypeId::NUMBER);
    let scores = arena.property("scores", list);
    let ty = arena.object_with_index(vec![scores], Some(TypeId::BOOLEAN), None);

    let detached = classify(&arena, &ty).detach();
    let mut visited = 0;
    walk(&detached, &mut |node: &TypeModel| {
        assert_eq!(node.origin(), None);
        visited += 1;
        true
    });
    assert_eq!(visited, 4);
}

#[test]
fn compiled_output_reads_back() {
    let mut arena = TypeArena::new();
    let tag = arena.string_literal("user");
    let kind = arena.property("kind", tag);
    let list = arena.array(TypeId::NUMBER);
    let scores = arena.optional_property("scores", list);
    let ty = arena.object_with_index(vec![kind, scores], None, Some(TypeId::STRING));

    let model = classify(&arena, &ty).detach();
    let text = model.to_json_string().unwrap();
    assert_eq!(TypeModel::from_json_str(&text).unwrap(), model);
}
