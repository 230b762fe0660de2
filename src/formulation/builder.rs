//! Separator formulation builder.

use super::config::FormulationConfig;
use crate::error::{Resource, Result, SubpartitionError};
use crate::graph::{Graph, Vertex};
use crate::ilp::{
    AssignmentVar, Colour, Constraint, ConstraintLabel, IlpModel, LinearTerm, Objective,
};
use crate::separator::{enumerate_separators, Separator, SeparatorCache};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counters describing one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of colours `k`.
    pub colours: Colour,
    /// Unordered non-adjacent pairs processed.
    pub non_adjacent_pairs: usize,
    /// Minimal separators over all pairs.
    pub separators: usize,
    /// Size of the largest separator seen.
    pub largest_separator: usize,
    /// At-most-one-colour constraints.
    pub gub_constraints: usize,
    /// Separator inequalities.
    pub separator_constraints: usize,
}

/// Builds the separator ILP of connected subpartitions.
///
/// For each vertex `u` and colour `c` there is a binary `x[u,c]`. The
/// model contains
///
/// - one `GUB{u}` row `Σ_c x[u,c] <= 1` per vertex (a vertex may stay
///   uncoloured), and
/// - for every non-adjacent pair `u < v`, every minimal `(u, v)`-separator
///   `Z` and every colour `c`, the row
///   `x[u,c] + x[v,c] - Σ_{z∈Z} x[z,c] <= 1`.
///
/// The 0/1 solutions are exactly the assignments in which every colour
/// class induces a connected subgraph.
///
/// Rows are ordered GUBs by vertex, then separator rows by `u`, `v`,
/// separator index, colour, so identical inputs give identical models.
///
/// # Examples
///
/// ```
/// use u_subpartition::formulation::{FormulationConfig, SubpartitionBuilder};
/// use u_subpartition::graph::catalog;
///
/// let mut builder = SubpartitionBuilder::new(FormulationConfig::default());
/// let (model, stats) = builder.build_with_stats(&catalog::claw(), 3).unwrap();
/// assert_eq!(stats.non_adjacent_pairs, 3);
/// assert_eq!(model.separator_constraint_count(), 9);
/// assert_eq!(model.gub_count(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubpartitionBuilder {
    config: FormulationConfig,
    cache: SeparatorCache,
}

impl SubpartitionBuilder {
    pub fn new(config: FormulationConfig) -> Self {
        Self {
            config,
            cache: SeparatorCache::new(),
        }
    }

    pub fn config(&self) -> &FormulationConfig {
        &self.config
    }

    /// Memoized separator families (empty unless `memoize` is set).
    pub fn cache(&self) -> &SeparatorCache {
        &self.cache
    }

    /// Builds the model for `graph` with `colours` parts.
    ///
    /// # Errors
    ///
    /// - [`SubpartitionError::InvalidConfig`] if the configuration is invalid
    /// - [`SubpartitionError::InvalidColourCount`] if `colours < 1`
    /// - [`SubpartitionError::EmptyGraph`] if the graph has no vertices
    /// - [`SubpartitionError::ResourceLimitExceeded`] if a configured cap is hit
    pub fn build(&mut self, graph: &Graph, colours: Colour) -> Result<IlpModel> {
        self.build_with_stats(graph, colours).map(|(model, _)| model)
    }

    /// Like [`build`](Self::build), also returning build counters.
    pub fn build_with_stats(
        &mut self,
        graph: &Graph,
        colours: Colour,
    ) -> Result<(IlpModel, BuildStats)> {
        self.config
            .validate()
            .map_err(SubpartitionError::InvalidConfig)?;
        if colours < 1 {
            return Err(SubpartitionError::InvalidColourCount(colours));
        }
        if graph.is_empty() {
            return Err(SubpartitionError::EmptyGraph);
        }

        let vertices = graph.vertices();
        let name = self.config.model_name.clone().unwrap_or_else(|| {
            format!("connected_subpartition_n{}_k{}", vertices.len(), colours)
        });
        let mut model = IlpModel::new(name);
        let mut stats = BuildStats {
            vertices: vertices.len(),
            colours,
            ..BuildStats::default()
        };

        for &u in &vertices {
            for c in 1..=colours {
                model.add_binary(AssignmentVar::new(u, c));
            }
        }
        model.set_objective(placeholder_objective(&vertices, colours));
        for &u in &vertices {
            model.add_constraint(gub_constraint(u, colours));
        }
        stats.gub_constraints = vertices.len();

        if self.config.memoize && self.cache.sync(graph) {
            debug!("separator cache invalidated by graph change");
        }

        let pairs = graph.non_adjacent_pairs();
        let budget = self.config.max_separator_constraints.map(RowBudget::new);
        debug!(pairs = pairs.len(), "enumerating separators");
        if self.config.parallel {
            self.add_separator_rows_parallel(
                graph,
                colours,
                &pairs,
                budget.as_ref(),
                &mut model,
                &mut stats,
            )?;
        } else {
            self.add_separator_rows(
                graph,
                colours,
                &pairs,
                budget.as_ref(),
                &mut model,
                &mut stats,
            )?;
        }

        info!(
            vertices = stats.vertices,
            colours,
            pairs = stats.non_adjacent_pairs,
            separators = stats.separators,
            constraints = model.constraint_count(),
            "built separator formulation"
        );
        Ok((model, stats))
    }

    fn add_separator_rows(
        &mut self,
        graph: &Graph,
        colours: Colour,
        pairs: &[(Vertex, Vertex)],
        budget: Option<&RowBudget>,
        model: &mut IlpModel,
        stats: &mut BuildStats,
    ) -> Result<()> {
        for &(u, v) in pairs {
            let cached = self.cached_family(u, v);
            let family = pair_family(graph, u, v, colours, cached, &self.config, budget)?;
            self.merge(family, model, stats);
        }
        Ok(())
    }

    /// Enumerates one batch of pairs per rayon round, so at most one batch
    /// of families is held before it is merged.
    #[cfg(feature = "parallel")]
    fn add_separator_rows_parallel(
        &mut self,
        graph: &Graph,
        colours: Colour,
        pairs: &[(Vertex, Vertex)],
        budget: Option<&RowBudget>,
        model: &mut IlpModel,
        stats: &mut BuildStats,
    ) -> Result<()> {
        let batch = rayon::current_num_threads().max(1);
        for chunk in pairs.chunks(batch) {
            let work: Vec<(Vertex, Vertex, Option<Arc<[Separator]>>)> = chunk
                .iter()
                .map(|&(u, v)| (u, v, self.cached_family(u, v)))
                .collect();
            let before = budget.map(RowBudget::remaining);
            let config = &self.config;
            let families: Result<Vec<PairFamily>> = work
                .par_iter()
                .map(|(u, v, cached)| {
                    pair_family(graph, *u, *v, colours, cached.clone(), config, budget)
                })
                .collect();
            match families {
                Ok(families) => {
                    for family in families {
                        self.merge(family, model, stats);
                    }
                }
                Err(err) => {
                    // Which pair fails first depends on scheduling. Replay the
                    // batch in pair order so the error names the same pair as
                    // a sequential build.
                    debug!(error = %err, "replaying failed batch in pair order");
                    if let (Some(budget), Some(left)) = (budget, before) {
                        budget.restore(left);
                    }
                    for (u, v, cached) in work {
                        let family =
                            pair_family(graph, u, v, colours, cached, &self.config, budget)?;
                        self.merge(family, model, stats);
                    }
                }
            }
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn add_separator_rows_parallel(
        &mut self,
        graph: &Graph,
        colours: Colour,
        pairs: &[(Vertex, Vertex)],
        budget: Option<&RowBudget>,
        model: &mut IlpModel,
        stats: &mut BuildStats,
    ) -> Result<()> {
        tracing::warn!(
            "parallel build requested without the `parallel` feature; running sequentially"
        );
        self.add_separator_rows(graph, colours, pairs, budget, model, stats)
    }

    fn cached_family(&mut self, u: Vertex, v: Vertex) -> Option<Arc<[Separator]>> {
        if self.config.memoize {
            self.cache.get(u, v)
        } else {
            None
        }
    }

    fn merge(&mut self, family: PairFamily, model: &mut IlpModel, stats: &mut BuildStats) {
        let PairFamily {
            u,
            v,
            separators,
            largest,
            constraints,
            memo,
        } = family;

        stats.non_adjacent_pairs += 1;
        stats.separators += separators;
        stats.largest_separator = stats.largest_separator.max(largest);
        stats.separator_constraints += constraints.len();

        debug!(u, v, separators, largest, "pair folded");
        model.constraints.extend(constraints);
        if let Some(memo) = memo {
            self.cache.insert(u, v, memo);
        }
    }
}

/// Builds the separator formulation with the default configuration.
///
/// # Examples
///
/// ```
/// use u_subpartition::formulation::build_subpartition_ilp;
/// use u_subpartition::graph::catalog;
///
/// let model = build_subpartition_ilp(&catalog::cycle(4), 1).unwrap();
/// let rows: Vec<String> = model.constraints.iter().map(|c| c.to_string()).collect();
/// assert_eq!(rows[4], "(1,3)-SEP_#1_c1: x1,1 + x3,1 - x2,1 - x4,1 <= 1");
/// assert_eq!(rows[5], "(2,4)-SEP_#1_c1: x2,1 + x4,1 - x1,1 - x3,1 <= 1");
/// ```
pub fn build_subpartition_ilp(graph: &Graph, colours: Colour) -> Result<IlpModel> {
    SubpartitionBuilder::default().build(graph, colours)
}

/// Arbitrary but deterministic objective: vertex `u` contributes
/// `u * c` on `x[u,c]` with `c = ((u - 1) mod k) + 1`.
fn placeholder_objective(vertices: &[Vertex], colours: Colour) -> Objective {
    let k = i64::from(colours);
    let terms = vertices
        .iter()
        .map(|&u| {
            let u = i64::from(u);
            let c = (u - 1).rem_euclid(k) + 1;
            // c lies in 1..=k, so it fits in a Colour.
            let var = AssignmentVar::new(u as Vertex, c as Colour);
            LinearTerm::new(u * c, var)
        })
        .collect();
    Objective::Maximize { terms }
}

fn gub_constraint(u: Vertex, colours: Colour) -> Constraint {
    let terms = (1..=colours)
        .map(|c| LinearTerm::new(1, AssignmentVar::new(u, c)))
        .collect();
    Constraint::new(ConstraintLabel::Gub { vertex: u }, terms, 1)
}

/// `x[u,c] + x[v,c] - Σ_{z∈Z} x[z,c] <= 1` for the `index`-th separator.
pub fn separator_constraint(
    u: Vertex,
    v: Vertex,
    index: usize,
    colour: Colour,
    separator: &Separator,
) -> Constraint {
    let mut terms = Vec::with_capacity(separator.len() + 2);
    terms.push(LinearTerm::new(1, AssignmentVar::new(u, colour)));
    terms.push(LinearTerm::new(1, AssignmentVar::new(v, colour)));
    terms.extend(
        separator
            .vertices()
            .iter()
            .map(|&z| LinearTerm::new(-1, AssignmentVar::new(z, colour))),
    );
    Constraint::new(
        ConstraintLabel::Separator {
            u,
            v,
            index,
            colour,
        },
        terms,
        1,
    )
}

/// Separator rows still allowed under `max_separator_constraints`.
///
/// One budget is shared by every pair of a build. Rows are reserved before
/// they are created, so enumeration stops as soon as the cap is reached.
#[derive(Debug)]
struct RowBudget {
    limit: usize,
    remaining: AtomicUsize,
}

impl RowBudget {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            remaining: AtomicUsize::new(limit),
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Relaxed)
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn restore(&self, remaining: usize) {
        self.remaining.store(remaining, Ordering::Relaxed);
    }

    /// Takes `rows` rows, or nothing and `false` if fewer are left.
    fn reserve(&self, rows: usize) -> bool {
        self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| {
                left.checked_sub(rows)
            })
            .is_ok()
    }
}

/// Separator rows of one pair, produced independently of other pairs.
struct PairFamily {
    u: Vertex,
    v: Vertex,
    separators: usize,
    largest: usize,
    constraints: Vec<Constraint>,
    memo: Option<Vec<Separator>>,
}

impl PairFamily {
    fn new(u: Vertex, v: Vertex) -> Self {
        Self {
            u,
            v,
            separators: 0,
            largest: 0,
            constraints: Vec::new(),
            memo: None,
        }
    }

    /// Folds separators into rows, stopping as soon as the per-pair cap
    /// is exceeded or the shared row budget runs out.
    fn extend(
        &mut self,
        separators: impl Iterator<Item = Separator>,
        colours: Colour,
        limit: Option<usize>,
        budget: Option<&RowBudget>,
    ) -> Result<()> {
        for separator in separators {
            self.separators += 1;
            if let Some(limit) = limit {
                if self.separators > limit {
                    return Err(SubpartitionError::ResourceLimitExceeded {
                        u: self.u,
                        v: self.v,
                        resource: Resource::SeparatorsPerPair,
                        limit,
                    });
                }
            }
            if let Some(budget) = budget {
                if !budget.reserve(colours as usize) {
                    return Err(SubpartitionError::ResourceLimitExceeded {
                        u: self.u,
                        v: self.v,
                        resource: Resource::SeparatorConstraints,
                        limit: budget.limit,
                    });
                }
            }
            self.largest = self.largest.max(separator.len());
            for colour in 1..=colours {
                self.constraints.push(separator_constraint(
                    self.u,
                    self.v,
                    self.separators,
                    colour,
                    &separator,
                ));
            }
        }
        Ok(())
    }
}

fn pair_family(
    graph: &Graph,
    u: Vertex,
    v: Vertex,
    colours: Colour,
    cached: Option<Arc<[Separator]>>,
    config: &FormulationConfig,
    budget: Option<&RowBudget>,
) -> Result<PairFamily> {
    let limit = config.max_separators_per_pair;
    let mut family = PairFamily::new(u, v);
    match cached {
        Some(separators) => family.extend(separators.iter().cloned(), colours, limit, budget)?,
        None => {
            let separators = enumerate_separators(graph, u, v)?;
            if config.memoize {
                let mut memo = Vec::new();
                family.extend(
                    separators.inspect(|s| memo.push(s.clone())),
                    colours,
                    limit,
                    budget,
                )?;
                family.memo = Some(memo);
            } else {
                family.extend(separators, colours, limit, budget)?;
            }
        }
    }
    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::catalog;
    use crate::ilp::to_lp_string;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn labels(model: &IlpModel) -> Vec<String> {
        model.constraints.iter().map(|c| c.label.to_string()).collect()
    }

    #[test]
    fn test_claw_three_colours() {
        let model = build_subpartition_ilp(&catalog::claw(), 3).unwrap();
        assert!(model.validate().is_ok());
        assert_eq!(model.variable_count(), 12);
        assert_eq!(model.gub_count(), 4);
        assert_eq!(model.separator_constraint_count(), 9);

        for (u, v) in [(1, 2), (1, 4), (2, 4)] {
            let rows: Vec<&Constraint> = model.separator_constraints(u, v).collect();
            assert_eq!(rows.len(), 3);
            for (c, row) in (1..=3).zip(&rows) {
                assert_eq!(
                    row.terms,
                    vec![
                        LinearTerm::new(1, AssignmentVar::new(u, c)),
                        LinearTerm::new(1, AssignmentVar::new(v, c)),
                        LinearTerm::new(-1, AssignmentVar::new(3, c)),
                    ]
                );
                assert_eq!(row.rhs, 1);
            }
        }
    }

    #[test]
    fn test_objective_placeholder() {
        let model = build_subpartition_ilp(&catalog::claw(), 3).unwrap();
        let objective = model.objective.as_ref().unwrap();
        assert!(objective.is_maximize());
        let expected: Vec<LinearTerm> = [(1, 1, 1), (2, 2, 4), (3, 3, 9), (4, 1, 4)]
            .iter()
            .map(|&(u, c, w)| LinearTerm::new(w, AssignmentVar::new(u, c)))
            .collect();
        assert_eq!(objective.terms(), expected.as_slice());
    }

    #[test]
    fn test_cycle_single_colour() {
        let model = build_subpartition_ilp(&catalog::cycle(4), 1).unwrap();
        assert_eq!(model.separator_constraint_count(), 2);
        let negative_terms: usize = model
            .constraints
            .iter()
            .filter(|c| c.is_separator())
            .map(|c| c.terms.iter().filter(|t| t.coefficient < 0).count())
            .sum();
        assert_eq!(negative_terms, 4);
    }

    #[test]
    fn test_complete_graph_has_only_gubs() {
        let model = build_subpartition_ilp(&catalog::complete(5), 3).unwrap();
        assert_eq!(model.separator_constraint_count(), 0);
        assert_eq!(model.constraint_count(), 5);
    }

    #[test]
    fn test_single_vertex() {
        let g = Graph::with_vertices([7]);
        let model = build_subpartition_ilp(&g, 2).unwrap();
        assert_eq!(labels(&model), vec!["GUB7"]);
        // (7 - 1) mod 2 + 1 = 1
        assert_eq!(
            model.objective.unwrap().terms(),
            &[LinearTerm::new(7, AssignmentVar::new(7, 1))]
        );
    }

    #[test]
    fn test_canonical_order() {
        let model = build_subpartition_ilp(&catalog::path(4), 2).unwrap();
        assert_eq!(
            labels(&model),
            vec![
                "GUB1",
                "GUB2",
                "GUB3",
                "GUB4",
                "(1,3)-SEP_#1_c1",
                "(1,3)-SEP_#1_c2",
                "(1,4)-SEP_#1_c1",
                "(1,4)-SEP_#1_c2",
                "(1,4)-SEP_#2_c1",
                "(1,4)-SEP_#2_c2",
                "(2,4)-SEP_#1_c1",
                "(2,4)-SEP_#1_c2",
            ]
        );
    }

    #[test]
    fn test_gub_rows() {
        let k = 3;
        let model = build_subpartition_ilp(&catalog::paw(), k).unwrap();
        for u in 1..=4 {
            let containing: Vec<&Constraint> = model
                .constraints
                .iter()
                .filter(|c| !c.is_separator())
                .filter(|c| c.terms.iter().any(|t| t.var.vertex == u))
                .collect();
            assert_eq!(containing.len(), 1);
            assert_eq!(containing[0].label, ConstraintLabel::Gub { vertex: u });
            assert_eq!(containing[0].terms.len(), k as usize);
            assert!(containing[0].terms.iter().all(|t| t.coefficient == 1));
        }
    }

    #[test]
    fn test_errors() {
        let claw = catalog::claw();
        assert!(matches!(
            build_subpartition_ilp(&claw, 0),
            Err(SubpartitionError::InvalidColourCount(0))
        ));
        assert!(matches!(
            build_subpartition_ilp(&Graph::new(), 2),
            Err(SubpartitionError::EmptyGraph)
        ));
        let mut builder =
            SubpartitionBuilder::new(FormulationConfig::default().with_max_separators_per_pair(0));
        assert!(matches!(
            builder.build(&claw, 2),
            Err(SubpartitionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_separator_cap_names_pair() {
        // P5: (1,5) is the first pair with three separators.
        let mut builder =
            SubpartitionBuilder::new(FormulationConfig::default().with_max_separators_per_pair(2));
        let err = builder.build(&catalog::path(5), 1).unwrap_err();
        assert!(matches!(
            err,
            SubpartitionError::ResourceLimitExceeded {
                u: 1,
                v: 5,
                resource: Resource::SeparatorsPerPair,
                limit: 2,
            }
        ));
    }

    #[test]
    fn test_constraint_cap_names_pair() {
        // Running totals for P5, k = 1: (1,3) 1, (1,4) 3, (1,5) 6.
        let mut builder = SubpartitionBuilder::new(
            FormulationConfig::default().with_max_separator_constraints(5),
        );
        let err = builder.build(&catalog::path(5), 1).unwrap_err();
        assert!(matches!(
            err,
            SubpartitionError::ResourceLimitExceeded {
                u: 1,
                v: 5,
                resource: Resource::SeparatorConstraints,
                limit: 5,
            }
        ));

        let mut builder = SubpartitionBuilder::new(
            FormulationConfig::default().with_max_separator_constraints(10),
        );
        assert!(builder.build(&catalog::path(5), 1).is_ok());
    }

    /// Three internally disjoint paths of 24 inner vertices between 10 and
    /// 999, so that pair alone has 24^3 minimal separators.
    fn braid() -> Vec<(Vertex, Vertex)> {
        let mut edges = Vec::new();
        for strand in 1..=3u32 {
            let base = strand * 100;
            edges.push((10, base + 1));
            edges.extend((1..24).map(|j| (base + j, base + j + 1)));
            edges.push((base + 24, 999));
        }
        edges
    }

    #[test]
    fn test_constraint_cap_stops_before_large_family() {
        let mut edges = vec![(1, 2), (2, 3)];
        edges.extend(braid());
        let g = Graph::from_edges(std::iter::empty(), edges).unwrap();
        for parallel in [false, true] {
            let config = FormulationConfig::default()
                .with_max_separator_constraints(1)
                .with_parallel(parallel);
            let err = SubpartitionBuilder::new(config).build(&g, 2).unwrap_err();
            assert!(
                matches!(
                    err,
                    SubpartitionError::ResourceLimitExceeded {
                        u: 1,
                        v: 3,
                        resource: Resource::SeparatorConstraints,
                        limit: 1,
                    }
                ),
                "parallel = {parallel}: {err}"
            );
        }
    }

    #[test]
    fn test_constraint_cap_inside_large_families() {
        let g = Graph::from_edges(std::iter::empty(), braid()).unwrap();
        let build = |parallel: bool| {
            let config = FormulationConfig::default()
                .with_max_separator_constraints(100)
                .with_parallel(parallel);
            SubpartitionBuilder::new(config).build(&g, 2).unwrap_err()
        };
        let sequential = build(false);
        assert!(matches!(
            sequential,
            SubpartitionError::ResourceLimitExceeded {
                resource: Resource::SeparatorConstraints,
                limit: 100,
                ..
            }
        ));
        assert_eq!(build(true).to_string(), sequential.to_string());
    }

    #[test]
    fn test_row_budget() {
        let budget = RowBudget::new(5);
        assert!(budget.reserve(2));
        assert!(budget.reserve(3));
        assert!(!budget.reserve(1));
        assert_eq!(budget.remaining(), 0);
        budget.restore(4);
        assert!(!budget.reserve(5));
        assert_eq!(budget.remaining(), 4);
    }

    #[test]
    fn test_stats() {
        let mut builder = SubpartitionBuilder::default();
        let (model, stats) = builder.build_with_stats(&catalog::path(5), 2).unwrap();
        assert_eq!(
            stats,
            BuildStats {
                vertices: 5,
                colours: 2,
                non_adjacent_pairs: 6,
                separators: 10,
                largest_separator: 1,
                gub_constraints: 5,
                separator_constraints: 20,
            }
        );
        assert_eq!(model.constraint_count(), 25);
        assert_eq!(model.name, "connected_subpartition_n5_k2");
    }

    #[test]
    fn test_idempotent() {
        let g = catalog::gnp(9, 0.35, &mut rand::rngs::StdRng::seed_from_u64(11));
        let first = build_subpartition_ilp(&g, 3).unwrap();
        let second = build_subpartition_ilp(&g, 3).unwrap();
        assert_eq!(first.constraints, second.constraints);
        assert_eq!(to_lp_string(&first), to_lp_string(&second));
    }

    #[test]
    fn test_memoized_rebuild() {
        let mut g = catalog::cycle(6);
        let mut builder =
            SubpartitionBuilder::new(FormulationConfig::default().with_memoize(true));
        let first = builder.build(&g, 2).unwrap();
        let pairs = g.non_adjacent_pairs().len();
        assert_eq!(builder.cache().len(), pairs);
        assert_eq!(builder.cache().stats(), (0, pairs));

        let second = builder.build(&g, 2).unwrap();
        assert_eq!(builder.cache().stats(), (pairs, pairs));
        assert_eq!(first.constraints, second.constraints);

        // A chord changes the separators; stale entries must not be used.
        g.add_edge(1, 4).unwrap();
        let chorded = builder.build(&g, 2).unwrap();
        let fresh = build_subpartition_ilp(&g, 2).unwrap();
        assert_eq!(chorded.constraints, fresh.constraints);
        assert_eq!(builder.cache().len(), g.non_adjacent_pairs().len());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = catalog::gnp(10, 0.3, &mut rand::rngs::StdRng::seed_from_u64(3));
        let sequential = build_subpartition_ilp(&g, 2).unwrap();
        let mut builder =
            SubpartitionBuilder::new(FormulationConfig::default().with_parallel(true));
        let parallel = builder.build(&g, 2).unwrap();
        assert_eq!(to_lp_string(&sequential), to_lp_string(&parallel));
    }

    /// Colour of each vertex (0 = uncoloured) for assignment number `code`.
    fn decode(code: usize, vertices: &[Vertex], k: Colour) -> Vec<(Vertex, Colour)> {
        let base = k as usize + 1;
        let mut rest = code;
        vertices
            .iter()
            .map(|&v| {
                let c = (rest % base) as Colour;
                rest /= base;
                (v, c)
            })
            .collect()
    }

    fn classes_connected(g: &Graph, colouring: &[(Vertex, Colour)], k: Colour) -> bool {
        (1..=k).all(|c| {
            let class: Vec<Vertex> = colouring
                .iter()
                .filter(|&&(_, col)| col == c)
                .map(|&(v, _)| v)
                .collect();
            let Some(&start) = class.first() else {
                return true;
            };
            let mut reached = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(x) = queue.pop_front() {
                for y in g.neighbors(x) {
                    if class.contains(&y) && !reached.contains(&y) {
                        reached.push(y);
                        queue.push_back(y);
                    }
                }
            }
            reached.len() == class.len()
        })
    }

    fn feasible(model: &IlpModel, colouring: &[(Vertex, Colour)]) -> bool {
        model.constraints.iter().all(|row| {
            row.is_satisfied(|var| colouring.contains(&(var.vertex, var.colour)))
        })
    }

    fn assert_exact_formulation(g: &Graph, k: Colour) {
        let model = build_subpartition_ilp(g, k).unwrap();
        let vertices = g.vertices();
        let total = (k as usize + 1).pow(vertices.len() as u32);
        for code in 0..total {
            let colouring = decode(code, &vertices, k);
            assert_eq!(
                feasible(&model, &colouring),
                classes_connected(g, &colouring, k),
                "colouring {colouring:?}"
            );
        }
    }

    #[test]
    fn test_feasible_points_are_connected_subpartitions() {
        assert_exact_formulation(&catalog::claw(), 3);
        assert_exact_formulation(&catalog::cycle(4), 2);
        assert_exact_formulation(&catalog::path(5), 2);
        assert_exact_formulation(&catalog::diamond(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_exact_on_random_graphs(seed in any::<u64>(), n in 1u32..=5, k in 1u32..=2) {
            let g = catalog::gnp(n, 0.4, &mut rand::rngs::StdRng::seed_from_u64(seed));
            assert_exact_formulation(&g, k);
        }
    }
}
