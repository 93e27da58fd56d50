//! Common test utilities

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use bankcore::audit::{AuditLog, AuditSink};
use bankcore::domain::{Account, AccountType, Amount, Customer, KycStatus};
use bankcore::handlers::{
    AccountHandler, CardHandler, KycHandler, LoanHandler, OtpHandler, TransferHandler,
};
use bankcore::notify::{NotificationSink, RecordingSink};
use bankcore::refgen::RefGen;
use bankcore::store::Store;
use bankcore::{Config, OperationContext};

/// Fully wired core with recording sinks, for end-to-end scenarios.
pub struct TestEnv {
    pub store: Store,
    pub config: Config,
    pub notifier: Arc<RecordingSink>,
    pub audit: Arc<AuditLog>,
    pub transfers: TransferHandler,
    pub otp: OtpHandler,
    pub loans: LoanHandler,
    pub kyc: KycHandler,
    pub accounts: AccountHandler,
    pub cards: CardHandler,
}

pub fn setup() -> TestEnv {
    let store = Store::new();
    let config = Config::default();
    let refgen = Arc::new(RefGen::new());
    let notifier = Arc::new(RecordingSink::new());
    let audit = Arc::new(AuditLog::new());

    let sink: Arc<dyn NotificationSink> = notifier.clone();
    let audit_sink: Arc<dyn AuditSink> = audit.clone();

    TestEnv {
        transfers: TransferHandler::new(
            store.clone(),
            refgen.clone(),
            sink.clone(),
            audit_sink.clone(),
            config.clone(),
        ),
        otp: OtpHandler::new(store.clone(), sink.clone(), audit_sink.clone(), config.clone()),
        loans: LoanHandler::new(store.clone(), refgen.clone(), sink.clone(), audit_sink.clone()),
        kyc: KycHandler::new(store.clone(), sink.clone(), audit_sink.clone(), config.clone()),
        accounts: AccountHandler::new(
            store.clone(),
            refgen.clone(),
            sink.clone(),
            audit_sink.clone(),
            config.clone(),
        ),
        cards: CardHandler::new(store.clone(), refgen, sink, audit_sink),
        store,
        config,
        notifier,
        audit,
    }
}

pub fn ctx() -> OperationContext {
    OperationContext::new().with_actor(Uuid::new_v4())
}

/// Seed a customer directly at the given KYC status.
pub async fn seed_customer(env: &TestEnv, email: &str, kyc_status: KycStatus) -> Customer {
    let mut customer = Customer::new(
        Uuid::new_v4(),
        email.to_string(),
        "Asha".to_string(),
        "Rao".to_string(),
    );
    customer.kyc_status = kyc_status;
    env.store
        .customers()
        .insert(customer)
        .await
        .expect("seed customer")
}

/// Seed an active savings account with an opening balance.
pub async fn seed_account(
    env: &TestEnv,
    customer: &Customer,
    number: &str,
    balance: Decimal,
) -> Account {
    let account = Account::new(
        number.to_string(),
        customer.id,
        AccountType::Savings,
        Decimal::from(500),
        "INR".to_string(),
    );
    env.store
        .accounts()
        .insert(account)
        .await
        .expect("seed account");
    if balance > Decimal::ZERO {
        env.store
            .ledger()
            .credit(number, &Amount::new(balance).expect("seed amount"))
            .await
            .expect("seed balance");
    }
    env.store.accounts().get(number).await.expect("seed account")
}
