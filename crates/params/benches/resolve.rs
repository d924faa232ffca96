use criterion::{Criterion, black_box, criterion_group, criterion_main};

use furrow_params::{FieldDeclaration, ParamType, RawParams, resolve};

fn fields() -> Vec<FieldDeclaration> {
    vec![
        FieldDeclaration::with_default("casing", ParamType::Text, "upper"),
        FieldDeclaration::with_default("testLong", ParamType::Long, "123"),
        FieldDeclaration::with_default("testInt", ParamType::Int, "789"),
        FieldDeclaration::with_default("testBool", ParamType::Bool, "false"),
        FieldDeclaration::nullable("testNullString", ParamType::NullableText),
        FieldDeclaration::nullable("testNullInt", ParamType::NullableInt),
        FieldDeclaration::required("required", ParamType::Text),
    ]
}

fn bench_resolve(c: &mut Criterion) {
    let declared = fields();
    let defaults_only = RawParams::new().set("required", "isRequired");
    let all_supplied = RawParams::new()
        .set("casing", "lower")
        .set("testLong", "456")
        .set("testInt", "1011")
        .set("testBool", "true")
        .set("testNullString", "text")
        .set("testNullInt", "9876")
        .set("required", "isRequired");

    c.bench_function("resolve_defaults_only", |b| {
        b.iter(|| resolve(black_box(&declared), black_box(&defaults_only)))
    });
    c.bench_function("resolve_all_supplied", |b| {
        b.iter(|| resolve(black_box(&declared), black_box(&all_supplied)))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
