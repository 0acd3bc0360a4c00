use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use libgraphql_modules::make_executable_schema;
use libgraphql_modules::types::GraphQLType;
use libgraphql_modules::types::ObjectTypeBuilder;
use libgraphql_modules::types::Param;
use libgraphql_modules::types::Resolver;
use libgraphql_modules::types::ResolverDecl;
use libgraphql_modules::types::TypeHint;
use libgraphql_modules::Resolved;

/// A query type referencing `count` object types, each with a handful of
/// fields and one resolver taking arguments.
fn code_first_types(count: usize) -> Vec<GraphQLType> {
    let objects: Vec<GraphQLType> = (0..count)
        .map(|i| {
            ObjectTypeBuilder::new(format!("Item{i}Type"))
                .annotation("id", TypeHint::Id)
                .annotation("display_name", TypeHint::String)
                .annotation("score", TypeHint::optional(TypeHint::Float))
                .annotation("tags", TypeHint::list(TypeHint::String))
                .annotation("related", TypeHint::optional(TypeHint::forward_ref(format!("Item{i}Type"))))
                .resolver(ResolverDecl::new(
                    "display_name",
                    Resolver::new(|_, _| Ok(Resolved::from("lorem")))
                        .param(Param::typed("upper_case", TypeHint::Boolean).default_value(false)),
                ))
                .build()
                .unwrap()
        })
        .collect();

    let mut query = ObjectTypeBuilder::new("QueryType");
    for (i, object) in objects.iter().enumerate() {
        query = query.annotation(format!("item_{i}"), TypeHint::optional(object));
    }
    vec![query.build().unwrap()]
}

fn schema_first_types(count: usize) -> Vec<GraphQLType> {
    let mut types: Vec<GraphQLType> = (0..count)
        .map(|i| {
            GraphQLType::from_schema(
                format!("Item{i}Type"),
                format!("type Item{i} {{ id: ID! displayName(upperCase: Boolean! = false): String! }}"),
            ).unwrap()
        })
        .collect();

    let fields: String = (0..count).map(|i| format!("item{i}: Item{i} ")).collect();
    types.push(GraphQLType::from_schema("QueryType", format!("type Query {{ {fields}}}")).unwrap());
    types
}

fn build_schema(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_executable_schema");

    for count in [10, 100] {
        let types = code_first_types(count);
        group.bench_with_input(BenchmarkId::new("code_first", count), &types, |b, types| {
            b.iter(|| black_box(make_executable_schema(types).unwrap()))
        });

        let types = schema_first_types(count);
        group.bench_with_input(BenchmarkId::new("schema_first", count), &types, |b, types| {
            b.iter(|| black_box(make_executable_schema(types).unwrap()))
        });
    }

    group.finish();
}

fn declare_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("declare_types");

    group.bench_function("code_first (100)", |b| {
        b.iter(|| black_box(code_first_types(100)))
    });

    group.bench_function("schema_first (100)", |b| {
        b.iter(|| black_box(schema_first_types(100)))
    });

    group.finish();
}

criterion_group!(benches, build_schema, declare_types);
criterion_main!(benches);
