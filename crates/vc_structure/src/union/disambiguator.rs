use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vc_wire::{StrKey, ValueMap};

use crate::error::AmbiguityReason;
use crate::info::{RecordType, TypeDescriptor};
use crate::schema::RecordSchema;

/// Picks the member of a record union from the keys of a wire mapping.
#[derive(Debug)]
pub(crate) struct Disambiguator {
    /// Members with the field names no other member has.
    candidates: Box<[(RecordType, Box<[&'static str]>)]>,
    /// The one member without exclusive fields, chosen when no other matches.
    fallback: Option<RecordType>,
}

impl Disambiguator {
    /// Analyzes the non-null members of a union.
    ///
    /// Fails if a member is not a record, or if more than one member has no
    /// exclusive field.
    pub fn build(
        members: &[TypeDescriptor],
        schema: impl Fn(RecordType) -> Arc<RecordSchema>,
    ) -> Result<Self, AmbiguityReason> {
        let mut records = Vec::with_capacity(members.len());
        for member in members.iter().filter(|member| !member.is_null()) {
            let Some(record) = member.as_record() else {
                return Err(AmbiguityReason::NonRecordMember {
                    member: member.clone(),
                });
            };
            let names: Vec<&'static str> =
                schema(record).fields().iter().map(|field| field.name()).collect();
            records.push((record, names));
        }

        let mut candidates = Vec::with_capacity(records.len());
        let mut fallback = None;
        for (index, (record, names)) in records.iter().enumerate() {
            let exclusive: Box<[&'static str]> = names
                .iter()
                .copied()
                .filter(|name| {
                    records.iter().enumerate().all(|(other, (_, other_names))| {
                        other == index || !other_names.contains(name)
                    })
                })
                .collect();

            if !exclusive.is_empty() {
                candidates.push((*record, exclusive));
            } else if fallback.is_none() {
                fallback = Some(*record);
            } else {
                return Err(AmbiguityReason::NoExclusiveField {
                    candidate: record.name(),
                });
            }
        }

        Ok(Self {
            candidates: candidates.into_boxed_slice(),
            fallback,
        })
    }

    /// Returns the only member whose exclusive fields appear in `map`, or
    /// the fallback member if none do.
    pub fn select(&self, map: &ValueMap) -> Result<RecordType, AmbiguityReason> {
        let mut matched = self.candidates.iter().filter(|(_, exclusive)| {
            exclusive
                .iter()
                .any(|name| map.contains_key(&StrKey(name)))
        });

        match (matched.next(), matched.next()) {
            (None, _) => self.fallback.ok_or(AmbiguityReason::NoCandidateMatched),
            (Some((record, _)), None) => Ok(*record),
            (Some(first), Some(second)) => {
                let mut candidates: Vec<&'static str> = [first, second]
                    .into_iter()
                    .chain(matched)
                    .map(|(record, _)| record.name())
                    .collect();
                candidates.sort_unstable();
                Err(AmbiguityReason::MultipleCandidatesMatched { candidates })
            }
        }
    }
}
