//! End-to-end scenarios across the handlers.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use bankcore::domain::{
    AccountType, CardType, DocumentType, KycStatus, LoanStatus, LoanType, OtpPurpose,
    ReviewAction, TransactionMode, TransactionStatus,
};
use bankcore::handlers::{KycDecision, KycUpload, LoanApplication, TransferCommand};
use bankcore::notify::NotificationKind;
use bankcore::CoreError;

use common::{ctx, seed_account, seed_customer, setup};

#[tokio::test]
async fn low_value_transfer_completes_without_passcode() {
    let env = setup();
    let sender = seed_customer(&env, "sender@example.com", KycStatus::Approved).await;
    let receiver = seed_customer(&env, "receiver@example.com", KycStatus::Approved).await;
    seed_account(&env, &sender, "FINS1", dec!(20000)).await;
    seed_account(&env, &receiver, "FINS2", dec!(1000)).await;

    let record = env
        .transfers
        .transfer(
            TransferCommand::new("FINS1".to_string(), dec!(5000), TransactionMode::Imps, sender.id)
                .with_to_account("FINS2".to_string())
                .with_description("rent".to_string()),
            &ctx(),
        )
        .await
        .unwrap();

    assert_eq!(record.status, TransactionStatus::Success);
    assert_eq!(record.balance_after.value(), dec!(15000));
    assert_eq!(record.counterparty.as_deref(), Some("FINS2"));

    let destination = env.store.accounts().get("FINS2").await.unwrap();
    assert_eq!(destination.balance.value(), dec!(6000));

    let source_history = env.store.transactions().list_by_account("FINS1").await;
    assert_eq!(source_history.len(), 1);
    let destination_history = env.store.transactions().list_by_account("FINS2").await;
    assert_eq!(destination_history.len(), 1);

    assert!(env.audit.verify_chain().is_valid);
}

#[tokio::test]
async fn high_value_transfer_fails_closed_without_passcode() {
    let env = setup();
    let sender = seed_customer(&env, "sender@example.com", KycStatus::Approved).await;
    let receiver = seed_customer(&env, "receiver@example.com", KycStatus::Approved).await;
    seed_account(&env, &sender, "FINS1", dec!(50000)).await;
    seed_account(&env, &receiver, "FINS2", dec!(0)).await;

    let err = env
        .transfers
        .transfer(
            TransferCommand::new("FINS1".to_string(), dec!(15000), TransactionMode::Neft, sender.id)
                .with_to_account("FINS2".to_string()),
            &ctx(),
        )
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::PasscodeRequired);

    // the rejection happened before any ledger mutation or record
    let source = env.store.accounts().get("FINS1").await.unwrap();
    assert_eq!(source.balance.value(), dec!(50000));
    let destination = env.store.accounts().get("FINS2").await.unwrap();
    assert_eq!(destination.balance.value(), dec!(0));
    assert_eq!(env.store.transactions().count().await, 0);
}

#[tokio::test]
async fn high_value_transfer_passcode_is_single_use() {
    let env = setup();
    let sender = seed_customer(&env, "sender@example.com", KycStatus::Approved).await;
    let receiver = seed_customer(&env, "receiver@example.com", KycStatus::Approved).await;
    seed_account(&env, &sender, "FINS1", dec!(50000)).await;
    seed_account(&env, &receiver, "FINS2", dec!(0)).await;

    let code = env
        .otp
        .issue("sender@example.com", OtpPurpose::Transaction, &ctx())
        .await
        .unwrap();
    // the code travels through the notification sink
    assert_eq!(env.notifier.count_of(NotificationKind::Otp), 1);

    let command = TransferCommand::new(
        "FINS1".to_string(),
        dec!(15000),
        TransactionMode::Rtgs,
        sender.id,
    )
    .with_to_account("FINS2".to_string())
    .with_passcode(code);

    env.transfers.transfer(command.clone(), &ctx()).await.unwrap();

    let err = env.transfers.transfer(command, &ctx()).await.unwrap_err();
    assert_eq!(err, CoreError::NoValidCode);

    let source = env.store.accounts().get("FINS1").await.unwrap();
    assert_eq!(source.balance.value(), dec!(35000));
    let destination = env.store.accounts().get("FINS2").await.unwrap();
    assert_eq!(destination.balance.value(), dec!(15000));
}

#[tokio::test]
async fn reissuing_a_passcode_invalidates_the_previous_one() {
    let env = setup();
    seed_customer(&env, "sender@example.com", KycStatus::Approved).await;

    let first = env
        .otp
        .issue("sender@example.com", OtpPurpose::Transaction, &ctx())
        .await
        .unwrap();
    let second = env
        .otp
        .issue("sender@example.com", OtpPurpose::Transaction, &ctx())
        .await
        .unwrap();

    if first != second {
        // superseded, so it reads as absent rather than wrong
        let err = env
            .otp
            .verify("sender@example.com", OtpPurpose::Transaction, &first, &ctx())
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::NoValidCode);
    }
    env.otp
        .verify("sender@example.com", OtpPurpose::Transaction, &second, &ctx())
        .await
        .unwrap();
}

#[tokio::test]
async fn repeated_wrong_codes_lock_the_passcode_out() {
    let env = setup();
    seed_customer(&env, "sender@example.com", KycStatus::Approved).await;

    let code = env
        .otp
        .issue("sender@example.com", OtpPurpose::Login, &ctx())
        .await
        .unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for _ in 0..env.config.otp_max_attempts {
        let err = env
            .otp
            .verify("sender@example.com", OtpPurpose::Login, wrong, &ctx())
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::IncorrectCode);
    }

    // the exhausted code is dead even when submitted correctly
    let err = env
        .otp
        .verify("sender@example.com", OtpPurpose::Login, &code, &ctx())
        .await
        .unwrap_err();
    assert_eq!(err, CoreError::NoValidCode);
}

#[tokio::test]
async fn kyc_promotes_on_exactly_the_second_approval() {
    let env = setup();
    let customer = seed_customer(&env, "new@example.com", KycStatus::Pending).await;
    let reviewer = Uuid::new_v4();

    let aadhaar = env
        .kyc
        .upload(
            KycUpload {
                customer_id: customer.id,
                document_type: DocumentType::Aadhaar,
                document_number: "1234-5678-9012".to_string(),
            },
            &ctx(),
        )
        .await
        .unwrap();
    let pan = env
        .kyc
        .upload(
            KycUpload {
                customer_id: customer.id,
                document_type: DocumentType::Pan,
                document_number: "ABCDE1234F".to_string(),
            },
            &ctx(),
        )
        .await
        .unwrap();

    env.kyc
        .record_decision(
            KycDecision {
                document_id: aadhaar.id,
                action: ReviewAction::Approve,
                rejection_reason: None,
                reviewer,
            },
            &ctx(),
        )
        .await
        .unwrap();
    let state = env.store.customers().get(customer.id).await.unwrap();
    assert_eq!(state.kyc_status, KycStatus::Submitted);

    env.kyc
        .record_decision(
            KycDecision {
                document_id: pan.id,
                action: ReviewAction::Approve,
                rejection_reason: None,
                reviewer,
            },
            &ctx(),
        )
        .await
        .unwrap();
    let state = env.store.customers().get(customer.id).await.unwrap();
    assert_eq!(state.kyc_status, KycStatus::Approved);
    assert_eq!(env.notifier.count_of(NotificationKind::Kyc), 1);
}

#[tokio::test]
async fn loan_without_approved_kyc_leaves_no_trace() {
    let env = setup();
    let customer = seed_customer(&env, "new@example.com", KycStatus::Submitted).await;

    let err = env
        .loans
        .apply(
            LoanApplication {
                customer_id: customer.id,
                loan_type: LoanType::Personal,
                principal: dec!(100000),
                tenure_months: 12,
                purpose: None,
            },
            &ctx(),
        )
        .await
        .unwrap_err();

    assert_eq!(err, CoreError::KycNotApproved);
    assert!(env.loans.list_for_customer(customer.id).await.is_empty());
    assert_eq!(env.notifier.count_of(NotificationKind::Loan), 0);
}

#[tokio::test]
async fn full_customer_journey() {
    let env = setup();
    let customer = seed_customer(&env, "journey@example.com", KycStatus::Pending).await;
    let reviewer = Uuid::new_v4();

    // verify email
    let code = env
        .otp
        .issue("journey@example.com", OtpPurpose::EmailVerification, &ctx())
        .await
        .unwrap();
    env.otp
        .verify("journey@example.com", OtpPurpose::EmailVerification, &code, &ctx())
        .await
        .unwrap();
    assert!(env.store.customers().get(customer.id).await.unwrap().email_verified);

    // complete KYC with two approved documents
    for (document_type, number) in [
        (DocumentType::Aadhaar, "1234-5678-9012"),
        (DocumentType::Pan, "ABCDE1234F"),
    ] {
        let doc = env
            .kyc
            .upload(
                KycUpload {
                    customer_id: customer.id,
                    document_type,
                    document_number: number.to_string(),
                },
                &ctx(),
            )
            .await
            .unwrap();
        env.kyc
            .record_decision(
                KycDecision {
                    document_id: doc.id,
                    action: ReviewAction::Approve,
                    rejection_reason: None,
                    reviewer,
                },
                &ctx(),
            )
            .await
            .unwrap();
    }

    // open and fund an account
    let account = env
        .accounts
        .open(customer.id, AccountType::Savings, &ctx())
        .await
        .unwrap();
    env.transfers
        .deposit(&account.account_number, dec!(200000), None, &ctx())
        .await
        .unwrap();

    // issue a card
    let card = env
        .cards
        .issue(&account.account_number, CardType::Debit, customer.id, None, &ctx())
        .await
        .unwrap();
    assert!(card.masked_number.ends_with(|c: char| c.is_ascii_digit()));

    // apply for a loan and have it approved
    let loan = env
        .loans
        .apply(
            LoanApplication {
                customer_id: customer.id,
                loan_type: LoanType::Home,
                principal: dec!(2500000),
                tenure_months: 240,
                purpose: Some("flat purchase".to_string()),
            },
            &ctx(),
        )
        .await
        .unwrap();
    let loan = env
        .loans
        .review(loan.id, ReviewAction::Approve, None, reviewer, &ctx())
        .await
        .unwrap();
    assert_eq!(loan.status, LoanStatus::Approved);

    // every step is on the audit chain
    let verification = env.audit.verify_chain();
    assert!(verification.is_valid);
    assert!(verification.entries_checked >= 8);
}

#[tokio::test]
async fn transaction_references_stay_unique_under_load() {
    let env = setup();
    let customer = seed_customer(&env, "busy@example.com", KycStatus::Approved).await;
    seed_account(&env, &customer, "FINS1", dec!(100000)).await;

    for _ in 0..50 {
        env.transfers
            .deposit("FINS1", dec!(10), None, &ctx())
            .await
            .unwrap();
    }

    let history = env.store.transactions().list_by_account("FINS1").await;
    let references: HashSet<_> = history.iter().map(|r| r.reference_number.clone()).collect();
    assert_eq!(references.len(), history.len());
}

#[tokio::test]
async fn concurrent_transfers_conserve_total_balance() {
    let env = setup();
    let alice = seed_customer(&env, "alice@example.com", KycStatus::Approved).await;
    let bob = seed_customer(&env, "bob@example.com", KycStatus::Approved).await;
    seed_account(&env, &alice, "FINS1", dec!(10000)).await;
    seed_account(&env, &bob, "FINS2", dec!(10000)).await;

    let transfers = Arc::new(env.transfers);
    let mut handles = Vec::new();
    for i in 0..40 {
        let transfers = Arc::clone(&transfers);
        let (from, to, requester) = if i % 2 == 0 {
            ("FINS1", "FINS2", alice.id)
        } else {
            ("FINS2", "FINS1", bob.id)
        };
        handles.push(tokio::spawn(async move {
            transfers
                .transfer(
                    TransferCommand::new(from.to_string(), dec!(10), TransactionMode::Upi, requester)
                        .with_to_account(to.to_string()),
                    &ctx(),
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let a = env.store.accounts().get("FINS1").await.unwrap();
    let b = env.store.accounts().get("FINS2").await.unwrap();
    assert_eq!(a.balance.value() + b.balance.value(), dec!(20000));
}
