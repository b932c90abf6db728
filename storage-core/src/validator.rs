// SPDX-License-Identifier: GPL-3.0-only

//! Encryption passphrase validation
//!
//! A single task owns the passphrase state and serializes every edit. Text edits restart a
//! debounce window; when it closes the passphrase is scored on a spawned query task. Each
//! text edit bumps a sequence number and only a result carrying the current sequence number
//! may settle the state.
//!
//! Rule states, strength and validity in the published [`ValidationSnapshot`] reflect the
//! last settled computation; `phase`, `encrypt` and `revision` track edits as they arrive.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use storage_contracts::PasswordQualityOracle;
use storage_types::{EncryptionState, Strength, ValidationPhase, ValidationSnapshot};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::error::OracleError;
use crate::oracle::QualityOracleClient;
use crate::rules::{PassphraseRules, is_form_valid};
use crate::settings::ValidatorSettings;

#[derive(Debug)]
enum Edit {
    Password(String),
    ConfirmPassword(String),
    Encrypt(bool),
}

#[derive(Debug)]
enum Message {
    Edit(Edit),
    /// Reply with the final values once every earlier edit is applied, then stop
    Leave(oneshot::Sender<EncryptionState>),
}

type QueryResult = (u64, Result<Strength, OracleError>);

/// Handle to the validation task of one visit to the encryption screen
///
/// Dropping the handle cancels any pending debounce or quality query right away;
/// [`leave`](Self::leave) first folds in every edit already submitted. Either way the last
/// published snapshot stays readable through existing receivers.
#[derive(Debug)]
pub struct EncryptionValidator {
    edits: mpsc::UnboundedSender<Message>,
    submitted: AtomicU64,
    snapshot: watch::Receiver<ValidationSnapshot>,
    state: watch::Receiver<EncryptionState>,
    cancel: CancellationToken,
}

impl EncryptionValidator {
    /// Start validating `initial`, the values stored from a previous visit.
    ///
    /// A non-empty initial passphrase is scored right away. Must be called inside a tokio
    /// runtime.
    pub fn spawn(
        oracle: Arc<dyn PasswordQualityOracle>,
        initial: EncryptionState,
        settings: ValidatorSettings,
    ) -> Self {
        let client = QualityOracleClient::new(oracle).with_timeout(settings.oracle_timeout);
        let cancel = CancellationToken::new();
        let (edit_tx, edit_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let (snapshot_tx, snapshot_rx) = watch::channel(ValidationSnapshot::default());
        let (state_tx, state_rx) = watch::channel(initial.clone());

        let mut actor = Actor {
            client,
            debounce: settings.debounce,
            state: initial,
            rules: PassphraseRules::default(),
            strength: Strength::Unknown,
            phase: ValidationPhase::Empty,
            revision: 0,
            edit_seq: 0,
            deadline: None,
            in_flight: None,
            cancel: cancel.clone(),
            results: result_tx,
            snapshot_tx,
            state_tx,
        };
        actor.enter();

        tokio::spawn(actor.run(edit_rx, result_rx));

        Self {
            edits: edit_tx,
            submitted: AtomicU64::new(0),
            snapshot: snapshot_rx,
            state: state_rx,
            cancel,
        }
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.submit(Edit::Password(password.into()));
    }

    pub fn set_confirm_password(&self, confirm_password: impl Into<String>) {
        self.submit(Edit::ConfirmPassword(confirm_password.into()));
    }

    pub fn set_encrypt(&self, encrypt: bool) {
        self.submit(Edit::Encrypt(encrypt));
    }

    fn submit(&self, edit: Edit) {
        self.submitted.fetch_add(1, Ordering::SeqCst);
        if self.edits.send(Message::Edit(edit)).is_err() {
            tracing::debug!("validator already stopped, edit dropped");
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> ValidationSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ValidationSnapshot> {
        self.snapshot.clone()
    }

    /// Current passphrase values, for the wizard to keep across visits
    pub fn encryption_state(&self) -> EncryptionState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<EncryptionState> {
        self.state.clone()
    }

    pub fn is_form_valid(&self) -> bool {
        self.snapshot.borrow().is_form_valid
    }

    pub fn blocks_navigation(&self) -> bool {
        self.snapshot.borrow().blocks_navigation()
    }

    /// Wait until every edit submitted so far has been folded in and nothing is pending.
    ///
    /// Returns the last published snapshot if the validator stops first.
    pub async fn settled(&self) -> ValidationSnapshot {
        let target = self.submitted.load(Ordering::SeqCst);
        let mut snapshot = self.snapshot.clone();

        if let Ok(settled) = snapshot
            .wait_for(|s| s.revision >= target && s.is_settled())
            .await
        {
            return settled.clone();
        }
        snapshot.borrow().clone()
    }

    /// Leave the screen: fold in every edit submitted so far, cancel pending work and return
    /// the final passphrase values.
    pub async fn leave(self) -> EncryptionState {
        let (reply, kept) = oneshot::channel();
        if self.edits.send(Message::Leave(reply)).is_ok()
            && let Ok(state) = kept.await
        {
            return state;
        }

        self.cancel.cancel();
        self.encryption_state()
    }
}

impl Drop for EncryptionValidator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Actor {
    client: QualityOracleClient,
    debounce: std::time::Duration,

    state: EncryptionState,
    rules: PassphraseRules,
    strength: Strength,
    phase: ValidationPhase,

    /// Edits of any kind applied so far
    revision: u64,
    /// Text edits applied so far; tags quality queries
    edit_seq: u64,

    deadline: Option<Instant>,
    in_flight: Option<CancellationToken>,

    cancel: CancellationToken,
    results: mpsc::UnboundedSender<QueryResult>,
    snapshot_tx: watch::Sender<ValidationSnapshot>,
    state_tx: watch::Sender<EncryptionState>,
}

impl Actor {
    async fn run(
        mut self,
        mut edits: mpsc::UnboundedReceiver<Message>,
        mut results: mpsc::UnboundedReceiver<QueryResult>,
    ) {
        let cancel = self.cancel.clone();

        loop {
            let deadline = self.deadline;

            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                message = edits.recv() => match message {
                    Some(Message::Edit(edit)) => self.apply(edit),
                    Some(Message::Leave(reply)) => {
                        // The handle may have been dropped while waiting.
                        let _ = reply.send(self.state.clone());
                        break;
                    }
                    None => break,
                },

                Some((seq, result)) = results.recv() => self.settle(seq, result),

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deadline = None;
                    self.start_query();
                }
            }
        }

        self.cancel_query();
        tracing::debug!(revision = self.revision, "passphrase validator stopped");
    }

    /// Initial computation on screen entry; no debounce for stored values.
    fn enter(&mut self) {
        if self.state.password.is_empty() {
            self.settle_empty();
        } else {
            self.start_query();
        }
    }

    fn apply(&mut self, edit: Edit) {
        self.revision += 1;

        match edit {
            Edit::Password(password) => {
                self.state = self.state.with_password(password);
                self.text_edited();
            }
            Edit::ConfirmPassword(confirm_password) => {
                self.state = self.state.with_confirm_password(confirm_password);
                self.text_edited();
            }
            Edit::Encrypt(encrypt) => {
                self.state = self.state.with_encrypt(encrypt);
                self.publish();
            }
        }

        self.state_tx.send_replace(self.state.clone());
    }

    fn text_edited(&mut self) {
        self.edit_seq += 1;
        self.cancel_query();

        if self.state.password.is_empty() {
            self.deadline = None;
            self.settle_empty();
        } else {
            self.deadline = Some(Instant::now() + self.debounce);
            self.phase = ValidationPhase::Typing;
            self.publish();
        }
    }

    fn settle_empty(&mut self) {
        self.rules = PassphraseRules::evaluate(&self.state.password, &self.state.confirm_password);
        self.strength = Strength::Unknown;
        self.phase = ValidationPhase::Empty;
        self.publish();
    }

    fn start_query(&mut self) {
        let seq = self.edit_seq;
        let password = self.state.password.clone();
        let client = self.client.clone();
        let results = self.results.clone();
        let token = self.cancel.child_token();
        self.in_flight = Some(token.clone());

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => return,
                result = client.score(&password) => result,
            };
            // The actor may already be gone.
            let _ = results.send((seq, result));
        });

        self.phase = ValidationPhase::Scoring;
        self.publish();
    }

    fn cancel_query(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    fn settle(&mut self, seq: u64, result: Result<Strength, OracleError>) {
        if seq != self.edit_seq {
            tracing::trace!(seq, current = self.edit_seq, "discarding stale quality result");
            return;
        }
        self.in_flight = None;

        self.strength = result.unwrap_or_else(|err| {
            tracing::warn!("passphrase strength unknown: {err}");
            Strength::Unknown
        });
        self.rules = PassphraseRules::evaluate(&self.state.password, &self.state.confirm_password);
        self.phase = ValidationPhase::Settled;
        self.publish();
    }

    fn snapshot(&self) -> ValidationSnapshot {
        ValidationSnapshot {
            revision: self.revision,
            phase: self.phase,
            rule_length: self.rules.length,
            rule_confirm_matches: self.rules.confirm_matches,
            strength: self.strength,
            encrypt: self.state.encrypt,
            is_form_valid: is_form_valid(self.state.encrypt, &self.rules, self.strength),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use storage_contracts::{PasswordQuality, StorageError};
    use storage_types::RuleState;

    use super::*;

    #[derive(Default)]
    struct CountingOracle {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PasswordQualityOracle for CountingOracle {
        async fn score_password(
            &self,
            password: &str,
            _force: bool,
        ) -> Result<PasswordQuality, StorageError> {
            self.calls.lock().unwrap().push(password.to_string());
            Ok(PasswordQuality::new(50))
        }
    }

    fn actor_for_test() -> (Actor, mpsc::UnboundedReceiver<QueryResult>) {
        let (results, result_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(ValidationSnapshot::default());
        let (state_tx, _) = watch::channel(EncryptionState::default());
        let actor = Actor {
            client: QualityOracleClient::new(Arc::new(CountingOracle::default())),
            debounce: Duration::from_millis(300),
            state: EncryptionState::new("abcdefgh", "abcdefgh", true),
            rules: PassphraseRules::default(),
            strength: Strength::Unknown,
            phase: ValidationPhase::Scoring,
            revision: 0,
            edit_seq: 2,
            deadline: None,
            in_flight: None,
            cancel: CancellationToken::new(),
            results,
            snapshot_tx,
            state_tx,
        };
        (actor, result_rx)
    }

    #[tokio::test]
    async fn stale_result_does_not_settle() {
        let (mut actor, _results) = actor_for_test();

        actor.settle(1, Ok(Strength::Strong));
        assert_eq!(actor.strength, Strength::Unknown);
        assert_eq!(actor.phase, ValidationPhase::Scoring);

        actor.settle(2, Ok(Strength::Medium));
        assert_eq!(actor.strength, Strength::Medium);
        assert_eq!(actor.phase, ValidationPhase::Settled);
        assert!(actor.snapshot().is_form_valid);
    }

    #[tokio::test]
    async fn oracle_failure_settles_as_unknown() {
        let (mut actor, _results) = actor_for_test();

        actor.settle(2, Err(OracleError::OutOfRange(250)));

        let snapshot = actor.snapshot();
        assert_eq!(snapshot.strength, Strength::Unknown);
        assert_eq!(snapshot.rule_length, RuleState::Success);
        assert!(!snapshot.is_form_valid);
    }

    #[tokio::test]
    async fn encrypt_toggle_keeps_sequence() {
        let (mut actor, _results) = actor_for_test();
        actor.settle(2, Err(OracleError::Timeout(Duration::from_secs(5))));

        actor.apply(Edit::Encrypt(false));

        assert_eq!(actor.edit_seq, 2);
        assert_eq!(actor.revision, 1);
        assert!(actor.snapshot().is_form_valid);
        assert_eq!(actor.phase, ValidationPhase::Settled);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_initial_state_settles_without_query() {
        let oracle = Arc::new(CountingOracle::default());
        let validator = EncryptionValidator::spawn(
            oracle.clone(),
            EncryptionState::default(),
            ValidatorSettings::default(),
        );

        let snapshot = validator.settled().await;

        assert_eq!(snapshot.phase, ValidationPhase::Empty);
        assert_eq!(snapshot.rule_length, RuleState::Indeterminate);
        assert!(snapshot.is_form_valid);
        assert!(oracle.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stored_passphrase_is_scored_on_entry() {
        let oracle = Arc::new(CountingOracle::default());
        let validator = EncryptionValidator::spawn(
            oracle.clone(),
            EncryptionState::new("stored-secret", "stored-secret", true),
            ValidatorSettings::default(),
        );

        assert_eq!(validator.snapshot().phase, ValidationPhase::Scoring);
        assert!(validator.blocks_navigation());

        let snapshot = validator.settled().await;
        assert_eq!(snapshot.strength, Strength::Medium);
        assert!(snapshot.is_form_valid);
        assert!(!validator.blocks_navigation());
        assert_eq!(*oracle.calls.lock().unwrap(), ["stored-secret"]);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_passphrase_drops_pending_query() {
        let oracle = Arc::new(CountingOracle::default());
        let validator = EncryptionValidator::spawn(
            oracle.clone(),
            EncryptionState::new("", "", true),
            ValidatorSettings::default(),
        );

        validator.set_password("abc");
        tokio::time::sleep(Duration::from_millis(100)).await;
        validator.set_password("");

        let snapshot = validator.settled().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(snapshot.phase, ValidationPhase::Empty);
        assert_eq!(snapshot.strength, Strength::Unknown);
        assert!(!snapshot.is_form_valid);
        assert!(oracle.calls.lock().unwrap().is_empty());
    }
}
