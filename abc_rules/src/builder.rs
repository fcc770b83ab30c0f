pub use crate::config::*;

use num_bigint::BigInt;
use num_rational::BigRational;

/// A builder for assembling a profile ballot by ballot.
///
/// All the raw inputs go through this builder (or through [Profile::add_ballot]),
/// which checks candidate indices and weights.
///
/// ```
/// use abc_rules::builder::ProfileBuilder;
/// # use abc_rules::AbcError;
///
/// let mut builder = ProfileBuilder::new(3)?
///     .names(&["Anna".to_string(), "Bob".to_string(), "Clara".to_string()])?;
///
/// builder.add_vote_simple(&[0, 1])?;
/// builder.add_vote(&[2], 3)?;
///
/// let profile = builder.build();
/// assert_eq!(profile.len(), 2);
/// assert!(!profile.has_unit_weights());
///
/// # Ok::<(), AbcError>(())
/// ```
pub struct ProfileBuilder {
    pub(crate) _profile: Profile,
}

impl ProfileBuilder {
    pub fn new(num_cand: usize) -> Result<ProfileBuilder, AbcError> {
        Ok(ProfileBuilder {
            _profile: Profile::new(num_cand)?,
        })
    }

    pub fn names(self, names: &[String]) -> Result<ProfileBuilder, AbcError> {
        let mut profile = Profile::with_names(self._profile.num_cand(), names)?;
        for b in self._profile.ballots() {
            profile.add_ballot(b.clone())?;
        }
        Ok(ProfileBuilder { _profile: profile })
    }

    /// Adds a ballot with unit weight.
    pub fn add_vote_simple(&mut self, approved: &[usize]) -> Result<(), AbcError> {
        self._profile.add_ballot(Ballot::new(approved))
    }

    /// Adds a ballot with an integer weight.
    pub fn add_vote(&mut self, approved: &[usize], weight: u64) -> Result<(), AbcError> {
        let w = BigRational::from_integer(BigInt::from(weight));
        self.add_vote_weighted(approved, w)
    }

    /// Adds a ballot with an arbitrary positive weight.
    pub fn add_vote_weighted(
        &mut self,
        approved: &[usize],
        weight: BigRational,
    ) -> Result<(), AbcError> {
        self._profile
            .add_ballot(Ballot::with_weight(approved, weight)?)
    }

    /// Adds the same unit ballot `count` times.
    pub fn add_votes_repeated(&mut self, approved: &[usize], count: usize) -> Result<(), AbcError> {
        for _ in 0..count {
            self.add_vote_simple(approved)?;
        }
        Ok(())
    }

    pub fn build(self) -> Profile {
        self._profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_candidates() {
        let mut builder = ProfileBuilder::new(2).unwrap();
        assert_eq!(
            builder.add_vote_simple(&[0, 2]),
            Err(AbcError::InvalidCandidate {
                candidate: 2,
                num_cand: 2
            })
        );
        assert!(builder.build().is_empty());
    }

    #[test]
    fn rejects_non_positive_weights() {
        let mut builder = ProfileBuilder::new(2).unwrap();
        let err = builder.add_vote(&[0], 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn names_keep_existing_ballots() {
        let mut builder = ProfileBuilder::new(2).unwrap();
        builder.add_vote_simple(&[1, 0, 1]).unwrap();
        let profile = builder
            .names(&["a".to_string(), "b".to_string()])
            .unwrap()
            .build();
        assert_eq!(profile.ballots()[0].approved(), &[0, 1]);
        assert_eq!(profile.names(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn missing_names() {
        let builder = ProfileBuilder::new(3).unwrap();
        assert!(matches!(
            builder.names(&["a".to_string()]),
            Err(AbcError::MissingNames {
                given: 1,
                num_cand: 3
            })
        ));
    }
}
