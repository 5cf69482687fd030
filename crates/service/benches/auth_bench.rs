use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::MockPrincipalRepository;
use service::auth::{AuthConfig, AuthService};

fn cfg() -> AuthConfig {
    AuthConfig {
        secret: "bench-secret".into(),
        algorithm: jsonwebtoken::Algorithm::HS256,
        access_ttl: Duration::from_secs(900),
        refresh_ttl: Duration::from_secs(604_800),
    }
}

fn bench_login(c: &mut Criterion) {
    let svc = AuthService::new(Arc::new(MockPrincipalRepository::default()), cfg());

    // pre-create owner outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        name: "Bench".into(),
        email: "bench@example.com".into(),
        phone: None,
        password: "Benchmark1".into(),
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login(LoginInput {
                    email: "bench@example.com".into(),
                    password: "Benchmark1".into(),
                }))
                .unwrap();
        });
    });
}

fn bench_resolve_bearer(c: &mut Criterion) {
    let svc = AuthService::new(Arc::new(MockPrincipalRepository::default()), cfg());

    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        name: "Bench".into(),
        email: "bearer@example.com".into(),
        phone: None,
        password: "Benchmark1".into(),
    }));
    let session = rt
        .block_on(svc.login(LoginInput {
            email: "bearer@example.com".into(),
            password: "Benchmark1".into(),
        }))
        .unwrap();

    c.bench_function("auth_resolve_bearer", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.resolve_bearer(Some(&session.access_token))).unwrap();
        });
    });
}

criterion_group!(benches, bench_login, bench_resolve_bearer);
criterion_main!(benches);
