//! # Wasm Bridge Dispatch Benchmarks
//!
//! | Path | What is measured |
//! |------|------------------|
//! | wb-01 Event Translator | `custom_events` over growing batches |
//! | wb-02 Handler Chain | bank sends resolved through the full default chain |
//! | wb-02 Handler Chain | decline walk for a message nobody claims |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_types::{Address, BlockInfo, Coin, Coins, Context, GasMeter};
use std::sync::Arc;
use wb_01_contract_events::prelude::{custom_events, ContractEvent};
use wb_02_message_dispatch::prelude::*;

// ============================================================================
// WB-01: Event Translation
// ============================================================================

fn bench_custom_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("wb-01-contract-events");
    let contract = Address::contract("wasm", 1, 1);
    let mut rng = rand::thread_rng();

    for size in [1usize, 10, 100] {
        let events: Vec<ContractEvent> = (0..size)
            .map(|i| {
                ContractEvent::new(format!("transfer_{i}"))
                    .add_attribute("amount", rng.gen::<u32>().to_string())
                    .add_attribute(" recipient ", " somebody ")
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("custom_events", size), &events, |b, events| {
            b.iter(|| black_box(custom_events(events, &contract).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// WB-02: Handler Chain
// ============================================================================

fn chain() -> (MessageHandlerChain, Address) {
    let config = DispatchConfig::default();
    let bank = Arc::new(InMemoryBank::new().with_burner_module(config.burn_module.clone()));
    let router = Arc::new(MsgServiceRouter::new());
    router.register("/cosmos.bank.v1beta1.MsgSend", bank.send_handler());
    let contract = Address::contract("wasm", 1, 1);
    bank.mint(
        &contract,
        &Coins::new(vec![Coin::new("ustake", u64::MAX)]).expect("valid coins"),
    )
    .expect("mint");
    let chain = default_message_handler(
        router,
        default_encoders(&config),
        Arc::new(InMemoryChannelKeeper::new()),
        Arc::new(InMemoryCapabilityKeeper::new()),
        bank,
        &config,
    );
    (chain, contract)
}

fn bench_handler_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("wb-02-message-dispatch");
    let (chain, contract) = chain();
    let ctx = Context::new(BlockInfo::default(), GasMeter::infinite());

    let send = ContractMsg::Bank(BankMsg::Send {
        to_address: Address::new(vec![2; 20]).to_hex(),
        amount: vec![WasmCoin::new("ustake", 1)],
    });
    group.bench_function("bank_send", |b| {
        b.iter(|| black_box(chain.dispatch(&ctx, &contract, "", &send).is_ok()))
    });

    let unclaimed = ContractMsg::Custom(serde_json::json!({"noop": {}}));
    group.bench_function("decline_walk", |b| {
        b.iter(|| black_box(chain.dispatch(&ctx, &contract, "", &unclaimed).is_err()))
    });

    group.finish();
}

criterion_group!(benches, bench_custom_events, bench_handler_chain);
criterion_main!(benches);
