//! Solidity ABI declarations for every bound contract.
//!
//! Functions are grouped by capability so that contracts sharing a capability share the same call
//! types (selectors depend only on name and argument types). Constructors live on `contract`
//! items, since `sol!` only generates `constructorCall` for contracts.

#![allow(missing_docs, clippy::too_many_arguments)]

use alloy_sol_types::sol;

sol! {
    interface IOwnable {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }

    interface IControlled {
        function controller() external view returns (address);
        function changeController(address newController) external;
    }

    interface IERC20Basic {
        function totalSupply() external view returns (uint256);
        function balanceOf(address who) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
    }

    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
    }

    interface IMiniMeToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function version() external view returns (string);
        function creationBlock() external view returns (uint256);
        function parentToken() external view returns (address);
        function parentSnapShotBlock() external view returns (uint256);
        function tokenFactory() external view returns (address);
        function transfersEnabled() external view returns (bool);
        function balanceOfAt(address owner, uint256 blockNumber) external view returns (uint256);
        function totalSupplyAt(uint256 blockNumber) external view returns (uint256);
        function createCloneToken(
            string cloneTokenName,
            uint8 cloneDecimalUnits,
            string cloneTokenSymbol,
            uint256 snapshotBlock,
            bool transfersEnabled
        ) external returns (address);
        function generateTokens(address owner, uint256 amount) external returns (bool);
        function destroyTokens(address owner, uint256 amount) external returns (bool);
        function enableTransfers(bool transfersEnabled) external;
        function approveAndCall(address spender, uint256 amount, bytes extraData)
            external
            returns (bool);
        function claimTokens(address token) external;

        event NewCloneToken(address indexed cloneToken, uint256 snapshotBlock);
    }

    interface IVestedToken {
        function tokenGrantsCount(address holder) external view returns (uint256);
        function spendableBalanceOf(address holder) external view returns (uint256);
        function setCanCreateGrants(address addr, bool allowed) external;
        function grants(address holder, uint256 index)
            external
            view
            returns (
                address granter,
                uint256 value,
                uint64 cliff,
                uint64 vesting,
                uint64 start,
                bool revokable,
                bool burnsOnRevoke
            );
        function tokenGrant(address holder, uint256 grantId)
            external
            view
            returns (
                address granter,
                uint256 value,
                uint256 vested,
                uint64 start,
                uint64 cliff,
                uint64 vesting,
                bool revokable,
                bool burnsOnRevoke
            );
        function lastTokenIsTransferableDate(address holder) external view returns (uint64);
        function grantVestedTokens(
            address to,
            uint256 value,
            uint64 start,
            uint64 cliff,
            uint64 vesting,
            bool revokable,
            bool burnsOnRevoke
        ) external;
        function transferableTokens(address holder, uint64 time) external view returns (uint256);
        function revokeTokenGrant(address holder, address receiver, uint256 grantId) external;
        function changeVestingWhitelister(address newWhitelister) external;
    }

    interface IMiniMeTokenFactory {
        function createCloneToken(
            address parentToken,
            uint256 snapshotBlock,
            string tokenName,
            uint8 decimalUnits,
            string tokenSymbol,
            bool transfersEnabled
        ) external returns (address);
    }

    interface IAccountRegistry {
        function inviteCollateralizer() external view returns (address);
        function blt() external view returns (address);
        function accounts(address account) external view returns (bool);
        function invites(address recipient) external view returns (bool);
        function invite(address recipient) external;
        function createAccount() external;
        function acceptInvite() external;
    }

    interface IInviteCollateralizer {
        function registry() external view returns (address);
        function blt() external view returns (address);
        function takeCollateral(address owner) external returns (bool);
    }

    interface IApproveAndCallFallBack {
        function receiveApproval(address from, uint256 amount, address token, bytes data) external;
    }

    interface ITokenController {
        function proxyPayment(address owner) external payable returns (bool);
        function onTransfer(address from, address to, uint256 amount) external returns (bool);
        function onApprove(address owner, address spender, uint256 amount) external returns (bool);
    }

    interface IConvertLib {
        function convert(uint256 amount, uint256 conversionRate) external pure returns (uint256);
    }

    interface IMetaCoin {
        function sendCoin(address receiver, uint256 amount) external returns (bool);
        function getBalanceInEth(address addr) external view returns (uint256);
        function getBalance(address addr) external view returns (uint256);
    }

    interface IMigrations {
        function owner() external view returns (address);
        function last_completed_migration() external view returns (uint256);
        function setCompleted(uint256 completed) external;
        function upgrade(address new_address) external;
    }

    contract AccountRegistry {
        constructor(address blt);
    }

    contract InviteCollateralizer {
        constructor(address registry, address blt);
    }

    contract BLT {
        constructor(address tokenFactory);
    }

    contract MiniMeToken {
        constructor(
            address tokenFactory,
            address parentToken,
            uint256 parentSnapShotBlock,
            string tokenName,
            uint8 decimalUnits,
            string tokenSymbol,
            bool transfersEnabled
        );
    }
}
