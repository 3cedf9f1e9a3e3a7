//! Guided-tour onboarding state machine
//!
//! The tour walks through a fixed sequence of steps. Completion is recorded
//! as a single version number in client storage; the tour is shown again
//! whenever the stored version is missing or older than
//! [`CURRENT_ONBOARDING_VERSION`], so bumping that constant re-triggers it
//! for everyone without any server-side state.

mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the tour content. Bump to show the tour to every user again.
pub const CURRENT_ONBOARDING_VERSION: u32 = 1;

/// Storage key holding the last completed tour version
pub const ONBOARDING_VERSION_KEY: &str = "onboarding_completed_version";

/// Tour steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStep {
    Welcome,
    Globe,
    Timeline,
    Contributions,
    GetStarted,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Welcome,
        OnboardingStep::Globe,
        OnboardingStep::Timeline,
        OnboardingStep::Contributions,
        OnboardingStep::GetStarted,
    ];

    pub const FIRST: OnboardingStep = OnboardingStep::Welcome;
    pub const LAST: OnboardingStep = OnboardingStep::GetStarted;

    pub fn index(self) -> usize {
        match self {
            OnboardingStep::Welcome => 0,
            OnboardingStep::Globe => 1,
            OnboardingStep::Timeline => 2,
            OnboardingStep::Contributions => 3,
            OnboardingStep::GetStarted => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "welcome",
            OnboardingStep::Globe => "globe",
            OnboardingStep::Timeline => "timeline",
            OnboardingStep::Contributions => "contributions",
            OnboardingStep::GetStarted => "getStarted",
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OnboardingStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown onboarding step: {s}"))
    }
}

/// Snapshot of tour progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub is_active: bool,
    pub current_step: OnboardingStep,
    pub has_completed: bool,
}

/// Onboarding state machine bound to a storage backend
#[derive(Debug)]
pub struct Onboarding<S: KeyValueStore> {
    store: S,
    current_version: u32,
    state: OnboardingState,
}

impl<S: KeyValueStore> Onboarding<S> {
    /// Resolve the initial state from storage using the built-in version
    pub fn hydrate(store: S) -> Result<Self, StoreError> {
        Self::hydrate_with_version(store, CURRENT_ONBOARDING_VERSION)
    }

    /// Resolve the initial state from storage against an explicit version
    ///
    /// The tour is active iff no version is stored or the stored one is
    /// older than `current_version`. Unreadable values count as absent.
    pub fn hydrate_with_version(store: S, current_version: u32) -> Result<Self, StoreError> {
        let stored = match store.get(ONBOARDING_VERSION_KEY)? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(version) => Some(version),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring unreadable onboarding version");
                    None
                }
            },
            None => None,
        };

        let is_active = stored.map_or(true, |version| version < current_version);

        Ok(Self {
            store,
            current_version,
            state: OnboardingState {
                is_active,
                current_step: OnboardingStep::FIRST,
                has_completed: !is_active,
            },
        })
    }

    pub fn state(&self) -> OnboardingState {
        self.state
    }

    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    pub fn is_first_step(&self) -> bool {
        self.state.current_step == OnboardingStep::FIRST
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step == OnboardingStep::LAST
    }

    /// 1-based position of the current step and the total step count
    pub fn progress(&self) -> (usize, usize) {
        (
            self.state.current_step.index() + 1,
            OnboardingStep::ALL.len(),
        )
    }

    pub fn start(&mut self) {
        self.state.is_active = true;
        self.state.current_step = OnboardingStep::FIRST;
    }

    /// Advance one step; stays on the last step
    ///
    /// Finishing the tour is the caller's job: call [`Self::complete`] when
    /// `next` is requested on the last step.
    pub fn next(&mut self) {
        let index = (self.state.current_step.index() + 1).min(OnboardingStep::LAST.index());
        self.state.current_step = OnboardingStep::ALL[index];
    }

    /// Go back one step; stays on the first step
    pub fn prev(&mut self) {
        let index = self.state.current_step.index().saturating_sub(1);
        self.state.current_step = OnboardingStep::ALL[index];
    }

    pub fn go_to(&mut self, step: OnboardingStep) {
        self.state.current_step = step;
    }

    /// Record the current version as completed and close the tour
    pub fn complete(&mut self) -> Result<(), StoreError> {
        self.store
            .set(ONBOARDING_VERSION_KEY, &self.current_version.to_string())?;
        self.state.is_active = false;
        self.state.has_completed = true;
        Ok(())
    }

    /// Same effect as [`Self::complete`]
    pub fn skip(&mut self) -> Result<(), StoreError> {
        self.complete()
    }

    /// Forget completion and restart from the first step
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.remove(ONBOARDING_VERSION_KEY)?;
        self.state = OnboardingState {
            is_active: true,
            current_step: OnboardingStep::FIRST,
            has_completed: false,
        };
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
