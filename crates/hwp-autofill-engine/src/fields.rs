//! Named form fields ("누름틀"), filled without any table navigation.

use std::collections::BTreeSet;

use crate::adapter::{AdapterError, DocumentActions};
use crate::error::FillError;

/// Distinct field names in the document, sorted.
pub fn list_fields<D>(doc: &mut D) -> Result<BTreeSet<String>, AdapterError>
where
    D: DocumentActions + ?Sized,
{
    Ok(doc
        .field_names()?
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect())
}

/// Write each value into the fields of the same name.
///
/// Unknown names are skipped and logged. Returns how many names were found
/// and written.
pub fn inject_fields<D, I, K, V>(doc: &mut D, data: I) -> Result<usize, AdapterError>
where
    D: DocumentActions + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let available = list_fields(doc)?;
    let mut count = 0;

    for (name, value) in data {
        let name = name.as_ref();
        if available.contains(name) {
            doc.put_field_text(name, value.as_ref())?;
            count += 1;
        } else {
            log::warn!("Field not found: {name}");
        }
    }

    Ok(count)
}

/// Write `value` into the `n`-th (1-based) field called `name`.
pub fn fill_nth<D>(doc: &mut D, name: &str, value: &str, n: usize) -> Result<(), FillError>
where
    D: DocumentActions + ?Sized,
{
    if n == 0 {
        return Err(FillError::InvalidOccurrence(n));
    }

    let matches: Vec<usize> = doc
        .field_names()?
        .iter()
        .enumerate()
        .filter(|(_, field)| field.as_str() == name)
        .map(|(index, _)| index)
        .collect();

    let Some(&index) = matches.get(n - 1) else {
        return Err(FillError::FieldOccurrenceUnavailable {
            name: name.to_string(),
            required: n,
            found: matches.len(),
        });
    };

    log::debug!("field '{name}' #{n} is field index {index}");
    doc.set_field_text_at(index, value)?;
    Ok(())
}
