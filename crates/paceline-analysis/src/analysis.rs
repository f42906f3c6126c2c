// ABOUTME: Workout analysis session: async construction and lazy cached domain conversion
// ABOUTME: Delivers a fully-populated time bundle or a failure, never a partial object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Analysis Session
//!
//! [`WorkoutAnalysis`] owns the time-domain bundle built from raw samples
//! and hands out distance- and climbing-domain bundles on demand.
//!
//! Construction is the only operation expected to run off a host
//! application's main thread: it is a single asynchronous unit of work
//! that resolves exactly once, with either a fully-populated bundle or an
//! error. Derived bundles are computed lazily on first request and
//! cached for the session's lifetime; the lazy initialization is
//! idempotent and race-free, and a recorded conversion failure is
//! replayed to later callers rather than recomputed.

use crate::config::AnalysisConfig;
use crate::domain::{DomainKey, WorkoutDomain};
use paceline_core::{AnalysisError, AnalysisResult, RawWorkoutData};
use std::sync::{Arc, OnceLock};
use tracing::debug;

type CachedDomain = OnceLock<Result<Arc<WorkoutDomain>, AnalysisError>>;

/// A workout analysis session: the time-domain bundle plus lazily
/// derived distance- and climbing-domain bundles
#[derive(Debug)]
pub struct WorkoutAnalysis {
    config: AnalysisConfig,
    time_domain: Arc<WorkoutDomain>,
    distance_domain: CachedDomain,
    climbing_domain: CachedDomain,
}

impl WorkoutAnalysis {
    /// Build the session synchronously on the calling thread
    ///
    /// # Errors
    ///
    /// Propagates construction failures from
    /// [`WorkoutDomain::time_domain`].
    pub fn new_blocking(raw: &RawWorkoutData, config: AnalysisConfig) -> AnalysisResult<Self> {
        let time_domain = Arc::new(WorkoutDomain::time_domain(raw, &config)?);
        debug!(samples = time_domain.len(), "workout analysis ready");
        Ok(Self {
            config,
            time_domain,
            distance_domain: OnceLock::new(),
            climbing_domain: OnceLock::new(),
        })
    }

    /// Build the session off the calling task as one asynchronous unit
    /// of work
    ///
    /// Resolves exactly once with either a fully-populated session or a
    /// failure; no partially populated object is ever observable.
    ///
    /// # Errors
    ///
    /// - construction failures from [`WorkoutDomain::time_domain`]
    /// - [`AnalysisError::TaskFailed`] when the background task cannot
    ///   complete
    pub async fn create(raw: RawWorkoutData, config: AnalysisConfig) -> AnalysisResult<Self> {
        tokio::task::spawn_blocking(move || Self::new_blocking(&raw, config))
            .await
            .map_err(|join_error| AnalysisError::TaskFailed {
                reason: join_error.to_string(),
            })?
    }

    /// The configuration this session was built with
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The time-domain bundle
    #[must_use]
    pub fn time_domain(&self) -> &Arc<WorkoutDomain> {
        &self.time_domain
    }

    /// The bundle for `key`, converting and caching it on first request
    ///
    /// Concurrent callers either compute once or receive the same cached
    /// result; a cached failure is replayed without recomputation.
    ///
    /// # Errors
    ///
    /// Conversion failures from [`WorkoutDomain::converted`], including
    /// replayed cached failures.
    pub fn domain(&self, key: DomainKey) -> AnalysisResult<Arc<WorkoutDomain>> {
        match key {
            DomainKey::Time => Ok(Arc::clone(&self.time_domain)),
            DomainKey::Distance => self.cached_conversion(&self.distance_domain, key),
            DomainKey::Climbing => self.cached_conversion(&self.climbing_domain, key),
        }
    }

    fn cached_conversion(
        &self,
        slot: &CachedDomain,
        key: DomainKey,
    ) -> AnalysisResult<Arc<WorkoutDomain>> {
        slot.get_or_init(|| {
            let resolution = self.config.resolution_for(self.time_domain.len());
            self.time_domain
                .converted_with_resolution(key, resolution)
                .map(Arc::new)
        })
        .clone()
    }
}
