// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Paginated lists of resources.
//!
//! A [`List`] holds one page of results plus the token for the next page.
//! [`List::all`] and [`List::into_stream`] walk the remaining pages,
//! optionally capped by a request limit.

use std::fmt;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};

use crate::backend::SharedBackend;
use crate::error::{Result, SdkError};

/// One page of a list response.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` when this is the last page.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Build a page, treating an empty token as the end of the list.
    pub fn new(items: Vec<T>, next_page_token: String) -> Self {
        Self {
            items,
            next_page_token: if next_page_token.is_empty() {
                None
            } else {
                Some(next_page_token)
            },
        }
    }
}

/// A resource that can be listed page by page.
#[async_trait]
pub trait Paged: Sized + Send + 'static {
    /// What the list is scoped to beyond the project (e.g. the instance id).
    type Scope: Clone + Send + Sync + 'static;

    async fn fetch_page(
        backend: &SharedBackend,
        scope: &Self::Scope,
        token: Option<&str>,
        max: Option<u32>,
    ) -> Result<Page<Self>>;
}

/// A page of resources with the means to fetch the following pages.
pub struct List<T: Paged> {
    items: Vec<T>,
    token: Option<String>,
    max: Option<u32>,
    scope: T::Scope,
    backend: SharedBackend,
}

impl<T: Paged> List<T> {
    /// Fetch the page starting at `token`.
    pub async fn fetch(
        backend: SharedBackend,
        scope: T::Scope,
        token: Option<String>,
        max: Option<u32>,
    ) -> Result<Self> {
        let page = T::fetch_page(&backend, &scope, token.as_deref(), max).await?;
        Ok(Self {
            items: page.items,
            token: page.next_page_token,
            max,
            scope,
            backend,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Token for the next page, if there is one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Maximum page size requested.
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch the next page. Returns `None` on the last page.
    pub async fn next(&self) -> Result<Option<List<T>>> {
        let Some(token) = self.token.clone() else {
            return Ok(None);
        };
        let next = Self::fetch(self.backend.clone(), self.scope.clone(), Some(token), self.max).await?;
        Ok(Some(next))
    }

    /// Collect this page and every following page.
    ///
    /// With a `request_limit` at most that many additional pages are
    /// fetched; `Some(0)` returns only the items already loaded.
    pub async fn all(self, request_limit: Option<u32>) -> Result<Vec<T>> {
        let mut results = Vec::new();
        let mut cursor = Cursor::Loaded(self, request_limit.map(i64::from));
        loop {
            let (list, limit) = match cursor {
                Cursor::Done => break,
                Cursor::Loaded(list, limit) => (list, limit),
                Cursor::Fetch(next, limit) => (next.fetch().await?, limit),
            };
            let (items, next) = list.advance(limit);
            results.extend(items);
            cursor = next;
        }
        Ok(results)
    }

    /// Stream items from this page and every following page, fetching
    /// each page only when the previous one has been consumed.
    pub fn into_stream(self, request_limit: Option<u32>) -> impl Stream<Item = Result<T>> + Send {
        stream::try_unfold(
            Cursor::Loaded(self, request_limit.map(i64::from)),
            |cursor| async move {
                let (list, limit) = match cursor {
                    Cursor::Done => return Ok::<_, SdkError>(None),
                    Cursor::Loaded(list, limit) => (list, limit),
                    Cursor::Fetch(next, limit) => (next.fetch().await?, limit),
                };
                Ok(Some(list.advance(limit)))
            },
        )
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, SdkError>)))
        .try_flatten()
    }

    /// Split into the loaded items and what to do next.
    fn advance(self, mut limit: Option<i64>) -> (Vec<T>, Cursor<T>) {
        let exhausted = match limit.as_mut() {
            Some(remaining) => {
                *remaining -= 1;
                *remaining < 0
            }
            None => false,
        };

        let next = match self.token {
            Some(token) if !exhausted => Cursor::Fetch(
                Continuation {
                    backend: self.backend,
                    scope: self.scope,
                    token,
                    max: self.max,
                },
                limit,
            ),
            _ => Cursor::Done,
        };
        (self.items, next)
    }
}

struct Continuation<T: Paged> {
    backend: SharedBackend,
    scope: T::Scope,
    token: String,
    max: Option<u32>,
}

impl<T: Paged> Continuation<T> {
    async fn fetch(self) -> Result<List<T>> {
        List::fetch(self.backend, self.scope, Some(self.token), self.max).await
    }
}

enum Cursor<T: Paged> {
    Loaded(List<T>, Option<i64>),
    Fetch(Continuation<T>, Option<i64>),
    Done,
}

impl<T: Paged + fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("items", &self.items)
            .field("token", &self.token)
            .field("max", &self.max)
            .finish()
    }
}

impl<T: Paged> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Paged> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Page size as sent on the wire (0 lets the service choose).
pub(crate) fn page_size(max: Option<u32>) -> i32 {
    max.map_or(0, |m| i32::try_from(m).unwrap_or(i32::MAX))
}
