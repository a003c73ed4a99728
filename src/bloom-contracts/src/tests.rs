use std::sync::Arc;

use alloy_primitives::{Address, Bytes, Log, B256, U256};
use alloy_sol_types::{Revert, SolCall, SolConstructor, SolError, SolEvent};
use bloom_contract_types::{CloneTokenParams, TransactionOptions};

use crate::{
    artifacts::{Artifact, ArtifactStore},
    deployments::Deployments,
    environment::Environment,
    errors::Error,
    interfaces::{self, IERC20Basic, IMiniMeToken, IMiniMeTokenFactory, IOwnable, IVestedToken},
    prelude::*,
    transport::{mock::RequestKind, MockTransport},
};

const NETWORK_ID: u64 = 5777;

fn sender() -> Address {
    Address::repeat_byte(0x01)
}

fn artifacts() -> ArtifactStore {
    let store = ArtifactStore::in_memory();
    store.insert(Artifact::new("AccountRegistry", "0x6080"));
    store.insert(Artifact::new("MiniMeToken", "0x6060"));
    store.insert(Artifact::new("ERC20", "0x"));
    store
}

fn setup_with(
    build: impl FnOnce(Environment) -> Environment,
) -> (Arc<MockTransport>, Arc<Environment>) {
    let mock = Arc::new(MockTransport::new(NETWORK_ID, vec![sender()]));
    let env = build(Environment::new(mock.clone(), artifacts()));
    (mock, Arc::new(env))
}

fn setup() -> (Arc<MockTransport>, Arc<Environment>) {
    setup_with(|env| env)
}

fn count(mock: &MockTransport, kind: RequestKind) -> usize {
    mock.requests().iter().filter(|r| r.kind == kind).count()
}

#[test]
fn test_at_issues_no_requests() {
    let (mock, env) = setup();
    let token = env
        .factory::<MiniMeTokenInstance>()
        .at(Address::repeat_byte(0x22));
    let registry: AccountRegistryContract = env.factory();
    let registry = registry.at(Address::repeat_byte(0x33));

    assert_eq!(token.address(), Address::repeat_byte(0x22));
    assert_eq!(registry.address(), Address::repeat_byte(0x33));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_view_call_decodes_declared_type() -> eyre::Result<()> {
    let (mock, env) = setup();
    let token_address = Address::repeat_byte(0x22);
    let holder = Address::repeat_byte(0x44);
    mock.respond(
        token_address,
        IERC20Basic::balanceOfCall::SELECTOR,
        IERC20Basic::balanceOfCall::abi_encode_returns(&(U256::from(1_000u64),)),
    );

    let token = env.factory::<Erc20Instance>().at(token_address);
    assert_eq!(token.balance_of(holder, None).await?, U256::from(1_000u64));

    let calls = mock.requests_of(RequestKind::Call);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to, Some(token_address));
    assert_eq!(
        calls[0].data,
        Bytes::from(IERC20Basic::balanceOfCall { who: holder }.abi_encode())
    );
    // Reads never resolve a sender.
    assert_eq!(count(&mock, RequestKind::Accounts), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_return_is_an_error() {
    let (mock, env) = setup();
    let token_address = Address::repeat_byte(0x22);
    mock.respond(token_address, IMiniMeToken::nameCall::SELECTOR, vec![0u8; 5]);

    let token = env.factory::<MiniMeTokenInstance>().at(token_address);
    let err = token.name(None).await.unwrap_err();
    assert!(matches!(err, Error::Abi(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_send_simulates_then_submits() -> eyre::Result<()> {
    let (mock, env) = setup();
    let token_address = Address::repeat_byte(0x22);
    let to = Address::repeat_byte(0x55);
    mock.respond(
        token_address,
        IERC20Basic::transferCall::SELECTOR,
        IERC20Basic::transferCall::abi_encode_returns(&(true,)),
    );

    let token = env.factory::<BltInstance>().at(token_address);
    let sent = token
        .transfer(to, U256::from(10u64), Some(TransactionOptions::new().gas(120_000)))
        .await?;

    assert!(sent.value);
    assert!(sent.transaction.is_mined());
    assert_eq!(sent.transaction.from, sender());
    assert_eq!(sent.transaction.to, Some(token_address));
    assert_eq!(sent.transaction.gas, 120_000);

    let kinds: Vec<_> = mock.requests().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![RequestKind::Accounts, RequestKind::Call, RequestKind::Send]
    );

    // The default sender is resolved once per environment.
    token.transfer(to, U256::from(1u64), None).await?;
    assert_eq!(count(&mock, RequestKind::Accounts), 1);
    assert_eq!(count(&mock, RequestKind::Send), 2);
    Ok(())
}

#[tokio::test]
async fn test_revert_surfaces_reason_and_skips_submission() {
    let (mock, env) = setup();
    let registry_address = Address::repeat_byte(0x66);
    let revert = Revert {
        reason: "not owner".to_string(),
    };
    mock.revert(
        registry_address,
        IOwnable::transferOwnershipCall::SELECTOR,
        revert.abi_encode(),
    );

    let registry = env.factory::<AccountRegistryInstance>().at(registry_address);
    let err = registry
        .transfer_ownership(Address::repeat_byte(0x77), None)
        .await
        .unwrap_err();

    match err {
        Error::Reverted {
            address, reason, ..
        } => {
            assert_eq!(address, Some(registry_address));
            assert!(reason.unwrap_or_default().contains("not owner"));
        }
        other => panic!("expected revert, got {other}"),
    }
    assert_eq!(count(&mock, RequestKind::Send), 0);
}

#[tokio::test]
async fn test_deploy_binds_fresh_addresses() -> eyre::Result<()> {
    let (mock, env) = setup();
    let factory: AccountRegistryContract = env.factory();
    let blt = Address::repeat_byte(0xb1);

    let first = factory.deploy(AccountRegistryArgs { blt }, None).await?;
    let second = factory.deploy(AccountRegistryArgs { blt }, None).await?;

    assert_ne!(first.value.address(), second.value.address());
    assert!(first.transaction.is_creation());
    assert!(first.transaction.is_mined());

    let sends = mock.requests_of(RequestKind::Send);
    assert_eq!(sends.len(), 2);
    assert_eq!(sends[0].to, None);
    let mut expected = vec![0x60, 0x80];
    expected.extend(interfaces::AccountRegistry::constructorCall { blt }.abi_encode());
    assert_eq!(sends[0].data.to_vec(), expected);
    assert_eq!(sends[0].data.len(), 2 + 32);
    Ok(())
}

#[tokio::test]
async fn test_deploy_without_bytecode_fails_before_sending() {
    let (mock, env) = setup();
    let err = env
        .factory::<Erc20Instance>()
        .deploy((), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotDeployable(ref name) if name == "ERC20"));

    let err = env
        .factory::<OwnableInstance>()
        .deploy((), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingArtifact(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_deploy_links_libraries() -> eyre::Result<()> {
    let (mock, env) = setup();
    let creation_code = format!("0x73__{:_<38}00", "ConvertLib");
    env.artifacts().insert(Artifact::new("MetaCoin", creation_code));

    let err = env
        .factory::<MetaCoinInstance>()
        .deploy((), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnlinkedLibrary { ref library, .. } if library == "ConvertLib"));

    let library = Address::repeat_byte(0xcc);
    env.link("ConvertLib", library);
    env.factory::<MetaCoinInstance>().deploy((), None).await?;

    let sends = mock.requests_of(RequestKind::Send);
    assert_eq!(sends.len(), 1);
    assert_eq!(&sends[0].data[1..21], library.as_slice());
    Ok(())
}

#[tokio::test]
async fn test_minime_constructor_encodes_missing_parent_as_zero() -> eyre::Result<()> {
    let (mock, env) = setup();
    let factory_address = Address::repeat_byte(0xfa);
    let args = MiniMeTokenArgs::new(factory_address, CloneTokenParams::new("Bloom", 18, "BLT"));

    env.factory::<MiniMeTokenInstance>().deploy(args, None).await?;

    let sends = mock.requests_of(RequestKind::Send);
    let expected = interfaces::MiniMeToken::constructorCall {
        tokenFactory: factory_address,
        parentToken: Address::ZERO,
        parentSnapShotBlock: U256::ZERO,
        tokenName: "Bloom".to_string(),
        decimalUnits: 18,
        tokenSymbol: "BLT".to_string(),
        transfersEnabled: true,
    }
    .abi_encode();
    assert_eq!(&sends[0].data[2..], expected.as_slice());
    Ok(())
}

#[tokio::test]
async fn test_deployed_is_idempotent() -> eyre::Result<()> {
    let (mock, env) = setup();
    let canonical = Address::repeat_byte(0xbb);
    env.artifacts()
        .insert(Artifact::new("BLT", "0x6080").with_network(NETWORK_ID, canonical));

    let factory: BltContract = env.factory();
    let first = factory.deployed().await?;
    let second = factory.deployed().await?;

    assert_eq!(first.address(), canonical);
    assert_eq!(second.address(), canonical);
    assert_eq!(count(&mock, RequestKind::NetworkId), 1);
    assert_eq!(count(&mock, RequestKind::Send), 0);
    Ok(())
}

#[tokio::test]
async fn test_deployed_falls_back_to_registry() -> eyre::Result<()> {
    let address = Address::repeat_byte(0x0d);
    let mut registry = Deployments::new("development");
    registry.record("Ownable", address, B256::repeat_byte(0x01));
    let (_mock, env) = setup_with(|env| env.with_deployments(registry));

    let ownable = env.factory::<OwnableInstance>().deployed().await?;
    assert_eq!(ownable.address(), address);

    let err = env
        .factory::<ControlledInstance>()
        .deployed()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotDeployed { ref contract, network_id: NETWORK_ID } if contract == "Controlled"
    ));
    Ok(())
}

#[tokio::test]
async fn test_deploy_records_into_registry_file() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("deployments.json");
    let registry = Deployments::load(&path, "development")?;
    let (_mock, env) = setup_with(|env| env.with_deployments(registry));

    let sent = env
        .factory::<AccountRegistryInstance>()
        .deploy(
            AccountRegistryArgs {
                blt: Address::repeat_byte(0xb1),
            },
            None,
        )
        .await?;

    let reloaded = Deployments::load(&path, "development")?;
    assert_eq!(
        reloaded.address_of("AccountRegistry"),
        Some(sent.value.address())
    );
    assert_eq!(
        reloaded.deployments["AccountRegistry"].tx_hashes,
        vec![sent.transaction.hash]
    );
    Ok(())
}

#[tokio::test]
async fn test_deploy_survives_registry_write_failure() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"")?;
    let registry = Deployments::load(blocker.join("deployments.json"), "development")?;
    let (mock, env) = setup_with(|env| env.with_deployments(registry));

    let sent = env
        .factory::<AccountRegistryInstance>()
        .deploy(
            AccountRegistryArgs {
                blt: Address::repeat_byte(0xb1),
            },
            None,
        )
        .await?;

    assert!(!sent.value.address().is_zero());
    assert_eq!(count(&mock, RequestKind::Send), 1);
    let in_memory = env.deployments().unwrap_or_default();
    assert_eq!(
        in_memory.address_of("AccountRegistry"),
        Some(sent.value.address())
    );
    Ok(())
}

#[tokio::test]
async fn test_grant_reads_preserve_field_order() -> eyre::Result<()> {
    let (mock, env) = setup();
    let token_address = Address::repeat_byte(0x22);
    let holder = Address::repeat_byte(0x44);
    let granter = Address::repeat_byte(0x99);

    mock.respond(
        token_address,
        IVestedToken::grantsCall::SELECTOR,
        IVestedToken::grantsCall::abi_encode_returns(&(
            granter,
            U256::from(500u64),
            1_100u64,
            2_000u64,
            1_000u64,
            true,
            false,
        )),
    );
    mock.respond(
        token_address,
        IVestedToken::tokenGrantCall::SELECTOR,
        IVestedToken::tokenGrantCall::abi_encode_returns(&(
            granter,
            U256::from(500u64),
            U256::from(125u64),
            1_000u64,
            1_100u64,
            2_000u64,
            false,
            true,
        )),
    );

    let token = env.factory::<MiniMeVestedTokenInstance>().at(token_address);

    let grant = token.grants(holder, U256::ZERO, None).await?;
    assert_eq!(
        grant.clone().into_tuple(),
        (granter, U256::from(500u64), 1_100, 2_000, 1_000, true, false)
    );
    assert_eq!(token.grants(holder, U256::ZERO, None).await?, grant);

    let status = token.token_grant(holder, U256::ZERO, None).await?;
    assert_eq!(status.vested, U256::from(125u64));
    assert_eq!(status.unvested(), U256::from(375u64));
    assert_eq!(
        status.into_tuple(),
        (
            granter,
            U256::from(500u64),
            U256::from(125u64),
            1_000,
            1_100,
            2_000,
            false,
            true
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_clone_token_operations_share_argument_shape() -> eyre::Result<()> {
    let (mock, env) = setup();
    let blt_address = Address::repeat_byte(0xbb);
    let factory_address = Address::repeat_byte(0xfa);
    let clone = Address::repeat_byte(0xc1);
    mock.respond(
        blt_address,
        IMiniMeToken::createCloneTokenCall::SELECTOR,
        IMiniMeToken::createCloneTokenCall::abi_encode_returns(&(clone,)),
    );
    mock.respond(
        factory_address,
        IMiniMeTokenFactory::createCloneTokenCall::SELECTOR,
        IMiniMeTokenFactory::createCloneTokenCall::abi_encode_returns(&(clone,)),
    );

    let params = CloneTokenParams::new("Bloom Clone", 18, "BLTC")
        .snapshot_block(U256::from(42u64))
        .transfers_enabled(false);

    let blt = env.factory::<BltInstance>().at(blt_address);
    let sent = blt.create_clone_token(params.clone(), None).await?;
    assert_eq!(sent.value, clone);

    let factory = env.factory::<MiniMeTokenFactoryInstance>().at(factory_address);
    let sent = factory.create_clone_token(None, params, None).await?;
    assert_eq!(sent.value, clone);

    let sends = mock.requests_of(RequestKind::Send);
    let from_token = IMiniMeToken::createCloneTokenCall::abi_decode(&sends[0].data, true)?;
    assert_eq!(from_token.cloneTokenName, "Bloom Clone");
    assert_eq!(from_token.cloneDecimalUnits, 18);
    assert_eq!(from_token.cloneTokenSymbol, "BLTC");
    assert_eq!(from_token.snapshotBlock, U256::from(42u64));
    assert!(!from_token.transfersEnabled);

    let from_factory = IMiniMeTokenFactory::createCloneTokenCall::abi_decode(&sends[1].data, true)?;
    assert_eq!(from_factory.parentToken, Address::ZERO);
    assert_eq!(from_factory.tokenName, from_token.cloneTokenName);
    assert_eq!(from_factory.snapshotBlock, from_token.snapshotBlock);
    Ok(())
}

fn new_clone_log(emitter: Address, clone: Address) -> Log {
    let event = IMiniMeToken::NewCloneToken {
        cloneToken: clone,
        snapshotBlock: U256::from(42u64),
    };
    Log {
        address: emitter,
        data: event.encode_log_data(),
    }
}

#[tokio::test]
async fn test_clone_address_comes_from_receipt_event() -> eyre::Result<()> {
    let (mock, env) = setup();
    let blt_address = Address::repeat_byte(0xbb);
    let simulated = Address::repeat_byte(0xc1);
    let mined = Address::repeat_byte(0xc2);
    let selector = IMiniMeToken::createCloneTokenCall::SELECTOR;
    mock.respond(
        blt_address,
        selector,
        IMiniMeToken::createCloneTokenCall::abi_encode_returns(&(simulated,)),
    );
    // Same event from an unrelated contract must not be picked up.
    mock.emit(
        blt_address,
        selector,
        new_clone_log(Address::repeat_byte(0x99), Address::repeat_byte(0xee)),
    );
    mock.emit(blt_address, selector, new_clone_log(blt_address, mined));

    let blt = env.factory::<BltInstance>().at(blt_address);
    let sent = blt
        .create_clone_token(CloneTokenParams::new("Bloom Clone", 18, "BLTC"), None)
        .await?;

    assert_eq!(sent.value, mined);
    assert_eq!(sent.logs.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_environment_defaults_apply_before_call_options() -> eyre::Result<()> {
    let configured = Address::repeat_byte(0xde);
    let (mock, env) = setup_with(|env| {
        env.with_defaults(
            TransactionOptions::new()
                .sender(configured)
                .gas(90_000)
                .gas_price(U256::from(20u64)),
        )
    });

    let registry = env
        .factory::<AccountRegistryInstance>()
        .at(Address::repeat_byte(0x66));
    registry
        .invite(
            Address::repeat_byte(0x70),
            Some(TransactionOptions::new().gas(300_000)),
        )
        .await?;

    let sends = mock.requests_of(RequestKind::Send);
    assert_eq!(sends[0].options.from, Some(configured));
    assert_eq!(sends[0].options.gas, Some(300_000));
    assert_eq!(sends[0].options.gas_price, Some(U256::from(20u64)));
    assert_eq!(count(&mock, RequestKind::Accounts), 0);
    Ok(())
}

#[tokio::test]
async fn test_send_transaction_forwards_value() -> eyre::Result<()> {
    let (mock, env) = setup();
    let token = env
        .factory::<MiniMeTokenInstance>()
        .at(Address::repeat_byte(0x22));

    let tx = token
        .send_transaction(Some(TransactionOptions::new().value(U256::from(1_000u64))))
        .await?;
    assert_eq!(tx.value, U256::from(1_000u64));
    assert!(tx.input.is_empty());
    // Plain transfers are not simulated.
    assert_eq!(count(&mock, RequestKind::Call), 0);
    Ok(())
}

#[tokio::test]
async fn test_no_accounts_means_no_sender() {
    let mock = Arc::new(MockTransport::new(NETWORK_ID, Vec::new()));
    let env = Arc::new(Environment::new(mock.clone(), artifacts()));

    let migrations = env
        .factory::<MigrationsInstance>()
        .at(Address::repeat_byte(0x12));
    let err = migrations
        .set_completed(U256::from(3u64), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoSender));
}
