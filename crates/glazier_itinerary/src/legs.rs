use thiserror::Error;

use crate::itinerary::{Itinerary, Leg};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LegAssociationError {
    /// The day's jobs were reordered, added or removed after the itinerary was computed.
    #[error("Itinerary stop order {itinerary:?} does not match job order {jobs:?}")]
    StaleOrder {
        itinerary: Vec<String>,
        jobs: Vec<String>,
    },
}

/// The ordered stop ids an itinerary was measured for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopOrderSignature(Vec<String>);

impl StopOrderSignature {
    pub fn of_itinerary(itinerary: &Itinerary) -> Self {
        Self(itinerary.stops.iter().map(|stop| stop.id.clone()).collect())
    }

    /// Job ids in display order, minus the ones the itinerary could not place.
    pub fn of_jobs<'a, I>(job_ids: I, unresolved_stop_ids: &[String]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self(
            job_ids
                .into_iter()
                .filter(|id| {
                    !unresolved_stop_ids
                        .iter()
                        .any(|unresolved| unresolved.as_str() == *id)
                })
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }
}

/// The leg that leaves a job: towards the next job, or back to base for the last one.
#[derive(Debug, PartialEq, Eq)]
pub struct JobLeg<'a> {
    pub job_id: &'a str,
    pub leg: &'a Leg,
}

/// Pairs each job with its outgoing leg, refusing to do so if the itinerary was computed
/// for a different job order.
pub fn associate_legs<'a, 'j, I>(
    itinerary: &'a Itinerary,
    job_ids: I,
) -> Result<Vec<JobLeg<'a>>, LegAssociationError>
where
    I: IntoIterator<Item = &'j str>,
{
    let expected = StopOrderSignature::of_itinerary(itinerary);
    let actual = StopOrderSignature::of_jobs(job_ids, &itinerary.unresolved_stop_ids);

    if expected != actual {
        return Err(LegAssociationError::StaleOrder {
            itinerary: expected.0,
            jobs: actual.0,
        });
    }

    itinerary
        .stops
        .iter()
        .map(|stop| {
            itinerary
                .leg_from(&stop.id)
                .map(|leg| JobLeg {
                    job_id: &stop.id,
                    leg,
                })
                .ok_or_else(|| LegAssociationError::StaleOrder {
                    itinerary: expected.0.clone(),
                    jobs: actual.0.clone(),
                })
        })
        .collect()
}
