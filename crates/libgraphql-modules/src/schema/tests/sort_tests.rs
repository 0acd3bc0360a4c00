use crate::ast;
use crate::schema::sort_schema_document;

fn sorted(sdl: &str) -> String {
    sort_schema_document(ast::schema::parse_owned(sdl).unwrap()).to_string()
}

const SCHEMA: &str = concat!(
    "type Query {\n",
    "  user(role: Role): User\n",
    "}\n",
    "\n",
    "type User {\n",
    "  id: ID!\n",
    "  posts: [Post!]!\n",
    "}\n",
    "\n",
    "enum Role {\n",
    "  ADMIN\n",
    "}\n",
    "\n",
    "type Post {\n",
    "  title: String!\n",
    "}\n",
    "\n",
    "scalar Date\n",
);

#[test]
fn roots_then_reachable_then_unreachable() {
    let names: Vec<String> = sort_schema_document(ast::schema::parse_owned(concat!(
        "scalar Date\n",
        "type Post { title: String! }\n",
        "enum Role { ADMIN }\n",
        "type Mutation { save: Boolean }\n",
        "scalar Any\n",
        "type User { id: ID! posts: [Post!]! }\n",
        "type Query { user(role: Role): User }\n",
    )).unwrap())
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            ast::schema::Definition::TypeDefinition(type_def) =>
                Some(ast::schema::type_def_name(type_def).to_string()),
            _ => None,
        })
        .collect();

    assert_eq!(names, vec!["Query", "User", "Post", "Role", "Mutation", "Any", "Date"]);
}

#[test]
fn directives_come_first() {
    let sdl = sorted(concat!(
        "type Query { a: Int }\n",
        "directive @b on FIELD_DEFINITION\n",
        "directive @a on FIELD_DEFINITION\n",
    ));

    let a = sdl.find("directive @a").unwrap();
    let b = sdl.find("directive @b").unwrap();
    assert!(a < b);
    assert!(b < sdl.find("type Query").unwrap());
}

#[test]
fn sorting_is_idempotent() {
    let once = sorted(SCHEMA);
    assert_eq!(sorted(&once), once);
}

#[test]
fn input_order_does_not_matter() {
    let mut definitions: Vec<&str> = SCHEMA.split("\n\n").collect();
    definitions.reverse();

    assert_eq!(sorted(&definitions.join("\n\n")), sorted(SCHEMA));
}
