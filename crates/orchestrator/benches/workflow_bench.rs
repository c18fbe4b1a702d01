use criterion::{Criterion, criterion_group, criterion_main};
use domain::{DonationPreference, TransactionRequest};
use orchestrator::{
    DashboardRefresher, InMemoryUpstreams, ProcessTransactionResponse, TransactionOrchestrator,
};
use rust_decimal_macros::dec;
use upstream::DonationPreferences;

fn bench_full_workflow(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let upstreams = InMemoryUpstreams::new();
    rt.block_on(async {
        upstreams
            .preferences
            .add_preference(DonationPreference::new(
                "C1",
                Some("OceanCleanup".to_string()),
            ))
            .await
            .unwrap();
    });
    let orchestrator = TransactionOrchestrator::new(upstreams.collaborators());
    let request =
        TransactionRequest::new("C1", "A1", "A2", dec!(49.30), "Transport", true).unwrap();

    c.bench_function("workflow/process_with_donation", |b| {
        b.iter(|| {
            rt.block_on(async {
                let run = orchestrator.process(&request).await.unwrap();
                ProcessTransactionResponse::from(run)
            })
        });
    });
}

fn bench_dashboard_refresh(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let upstreams = InMemoryUpstreams::new();
    upstreams.accounts.set_balance("A1", dec!(1000));
    upstreams.loyalty.set_balance("C1", 250);
    let refresher = DashboardRefresher::from_collaborators(&upstreams.collaborators());
    let customer = "C1".into();
    let account = "A1".into();

    c.bench_function("workflow/dashboard_refresh", |b| {
        b.iter(|| rt.block_on(refresher.refresh(&customer, &account)));
    });
}

criterion_group!(benches, bench_full_workflow, bench_dashboard_refresh);
criterion_main!(benches);
