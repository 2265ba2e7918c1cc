/// A filter consulted for every candidate during a search.
///
/// `results` is the result set accumulated so far and `candidate` the object
/// under consideration; both must be treated as read-only. The returned pair
/// is `(refuse, abort)`: if `refuse` is true the candidate is not added to
/// the result set, and if `abort` is true the search stops and returns the
/// current result set.
pub trait Filter<T> {
    fn filter(&self, results: &[&T], candidate: &T) -> (bool, bool);
}

/// Any `(results, candidate) -> (refuse, abort)` closure is a filter.
impl<T, F> Filter<T> for F
where
    F: Fn(&[&T], &T) -> (bool, bool),
{
    fn filter(&self, results: &[&T], candidate: &T) -> (bool, bool) {
        self(results, candidate)
    }
}

/// Aborts a search once the result set has reached `limit` entries.
pub struct LimitFilter {
    limit: usize,
}

impl LimitFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl<T> Filter<T> for LimitFilter {
    fn filter(&self, results: &[&T], _candidate: &T) -> (bool, bool) {
        if results.len() >= self.limit {
            return (true, true);
        }
        (false, false)
    }
}

/// Run every filter on `candidate` and return the OR-consensus.
///
/// A filter after an aborting one may still refuse the candidate, so the
/// loop only stops early once both flags are set.
pub(crate) fn apply_filters<T>(
    results: &[&T],
    candidate: &T,
    filters: &[&dyn Filter<T>],
) -> (bool, bool) {
    let mut refuse = false;
    let mut abort = false;
    for f in filters {
        let (r, a) = f.filter(results, candidate);
        refuse |= r;
        abort |= a;
        if refuse && abort {
            break;
        }
    }
    (refuse, abort)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limit_filter() {
        let f = LimitFilter::new(2);
        let a = 1;
        let one: Vec<&i32> = vec![&a];
        let two: Vec<&i32> = vec![&a, &a];
        assert_eq!(f.filter(&[], &a), (false, false));
        assert_eq!(f.filter(&one, &a), (false, false));
        assert_eq!(f.filter(&two, &a), (true, true));
    }

    #[test]
    fn consensus_is_or() {
        let refuse = |_: &[&i32], _: &i32| (true, false);
        let abort = |_: &[&i32], _: &i32| (false, true);
        let pass = |_: &[&i32], _: &i32| (false, false);

        let filters: Vec<&dyn Filter<i32>> = vec![&pass, &abort, &refuse];
        assert_eq!(apply_filters(&[], &0, &filters), (true, true));

        let filters: Vec<&dyn Filter<i32>> = vec![&pass, &pass];
        assert_eq!(apply_filters(&[], &0, &filters), (false, false));

        let filters: Vec<&dyn Filter<i32>> = vec![&refuse];
        assert_eq!(apply_filters(&[], &0, &filters), (true, false));
    }
}
