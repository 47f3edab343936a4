// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Error, Result};

/// Checks that `key` can be handed to the backend.
///
/// Keys are statically strings, so only emptiness is left to reject.
pub(crate) fn validate(key: &str) -> Result<&str> {
    if key.is_empty() {
        return Err(Error::invalid_key());
    }
    Ok(key)
}
