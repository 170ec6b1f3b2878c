// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Client-side checks on ids and options before they are sent.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SdkError};

static INSTANCE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][-a-z0-9]*[a-z0-9]$").expect("valid instance id regex"));
static DATABASE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_\-]*[a-z0-9]$").expect("valid database id regex"));
static LABEL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Ll}[\p{Ll}\p{N}_-]{0,62}$").expect("valid label key regex"));
static LABEL_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Ll}\p{N}_-]{0,63}$").expect("valid label value regex"));

pub const MAX_LABELS: usize = 64;

pub fn instance_id(id: &str) -> Result<()> {
    if !(6..=30).contains(&id.len()) || !INSTANCE_ID.is_match(id) {
        return Err(SdkError::InvalidInput(format!(
            "instance id {:?} must match [a-z][-a-z0-9]*[a-z0-9] and be 6-30 characters",
            id
        )));
    }
    Ok(())
}

pub fn display_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(4..=30).contains(&len) {
        return Err(SdkError::InvalidInput(format!(
            "display name {:?} must be 4-30 characters",
            name
        )));
    }
    Ok(())
}

pub fn nodes(nodes: i32) -> Result<()> {
    if nodes < 1 {
        return Err(SdkError::InvalidInput(format!(
            "node count must be at least 1, got {}",
            nodes
        )));
    }
    Ok(())
}

pub fn labels(labels: &HashMap<String, String>) -> Result<()> {
    if labels.len() > MAX_LABELS {
        return Err(SdkError::InvalidInput(format!(
            "at most {} labels are allowed, got {}",
            MAX_LABELS,
            labels.len()
        )));
    }
    for (key, value) in labels {
        if !LABEL_KEY.is_match(key) {
            return Err(SdkError::InvalidInput(format!("invalid label key {:?}", key)));
        }
        if !LABEL_VALUE.is_match(value) {
            return Err(SdkError::InvalidInput(format!(
                "invalid value {:?} for label {:?}",
                value, key
            )));
        }
    }
    Ok(())
}

pub fn database_id(id: &str) -> Result<()> {
    if !(2..=30).contains(&id.len()) || !DATABASE_ID.is_match(id) {
        return Err(SdkError::InvalidInput(format!(
            "database id {:?} must match [a-z][a-z0-9_-]*[a-z0-9] and be 2-30 characters",
            id
        )));
    }
    Ok(())
}
