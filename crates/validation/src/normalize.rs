//! Turns raw form fields into a [`CipherRequest`].

use common::protocol::FormFields;

use crate::key;
use crate::request::CipherRequest;

/// Build the canonical request for `form`.
///
/// Assembles the key, trims `data` and `iv`, and maps a blank `iv` to `None`.
/// `tagLength` is passed through untouched; only AEAD modes look at it.
pub fn normalize(form: &FormFields) -> CipherRequest {
    let iv = form
        .iv
        .as_deref()
        .map(str::trim)
        .filter(|iv| !iv.is_empty())
        .map(str::to_owned);

    CipherRequest {
        algorithm: form.algorithm,
        key: key::assemble(form.algorithm, &form.key1, &form.key2, &form.key3),
        mode: form.mode,
        padding: form.padding,
        data: form.data.trim().to_owned(),
        iv,
        input_type: form.input_type,
        tag_length: form.tag_length,
    }
}
