//! The conformance runner.
//!
//! A [`Runner`] walks a declarative spec in lock-step with the actual
//! channel tree. Consuming assertions advance a cursor through the current
//! sibling list and open a child context for the consumed node's children;
//! verifying assertions check properties of the node whose children are
//! currently under test.
//!
//! Each run owns its context stack exclusively. Failed expectations become
//! `Fail` results and never abort; authoring mistakes and inconsistent
//! input data abort immediately through [`EngineError`].

use tracing::{debug, trace};

use warden_acl::{self as acl, Guild, PermissionDiff, PermissionSet, diff};
use warden_tree::{Node, NodeKind};

use crate::error::{EngineError, EngineResult};
use crate::result::{Outcome, ResultNode};

/// One nesting level of a run.
struct TestContext<'a> {
    nodes: &'a [Node],
    /// Index of the most recently consumed node; -1 before the first.
    cursor: isize,
    results: Vec<ResultNode>,
}

impl<'a> TestContext<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        Self {
            nodes,
            cursor: -1,
            results: Vec::new(),
        }
    }

    fn consumed(&self) -> usize {
        (self.cursor + 1) as usize
    }

    /// Fold this level into its child-count result, carrying every
    /// accumulated result as a child.
    fn close(self) -> ResultNode {
        let consumed = self.consumed();
        let total = self.nodes.len();

        if consumed == total {
            ResultNode {
                outcome: Outcome::Pass,
                message: format!("child count matches ({total})"),
                children: self.results,
            }
        } else {
            ResultNode {
                outcome: Outcome::Fail,
                message: format!("expected {consumed} children, got {total} children"),
                children: self.results,
            }
        }
    }
}

/// A single conformance run over one actual tree.
///
/// Created by [`Runner::run`]; spec closures receive it mutably and issue
/// assertions as method calls, so "inside a run" is simply "holding a
/// runner".
pub struct Runner<'a> {
    guild: Option<&'a Guild>,
    stack: Vec<TestContext<'a>>,
}

impl<'a> Runner<'a> {
    /// Execute `spec` against the root-level sibling list.
    ///
    /// `guild` is only needed when the spec issues role or permission
    /// assertions. Returns the result tree, or a fatal error when the spec
    /// itself (or the supplied data) is broken.
    pub fn run<F>(nodes: &'a [Node], guild: Option<&'a Guild>, spec: F) -> EngineResult<ResultNode>
    where
        F: FnOnce(&mut Runner<'a>) -> EngineResult<()>,
    {
        debug!(nodes = nodes.len(), "starting conformance run");

        let mut runner = Runner {
            guild,
            stack: vec![TestContext::new(nodes)],
        };
        spec(&mut runner)?;

        let root = runner.stack.pop().ok_or(EngineError::NoOpenContext)?;
        if !runner.stack.is_empty() {
            return Err(EngineError::UnbalancedStack {
                depth: runner.stack.len(),
            });
        }

        let tree = root.close();
        debug!(passed = tree.resolved(), "conformance run finished");
        Ok(tree)
    }

    fn current(&mut self) -> EngineResult<&mut TestContext<'a>> {
        self.stack.last_mut().ok_or(EngineError::NoOpenContext)
    }

    /// The node whose children are currently under test.
    fn subject(&self) -> EngineResult<&'a Node> {
        if self.stack.len() < 2 {
            return Err(EngineError::NoSubject);
        }
        let parent = &self.stack[self.stack.len() - 2];
        let nodes: &'a [Node] = parent.nodes;
        nodes
            .get(parent.cursor as usize)
            .ok_or(EngineError::NoSubject)
    }

    fn require_nested(&self) -> EngineResult<()> {
        if self.stack.len() < 2 {
            return Err(EngineError::NoSubject);
        }
        Ok(())
    }

    fn guild(&self) -> EngineResult<&'a Guild> {
        self.guild.ok_or(EngineError::MissingGuild)
    }

    /// Run a verifying assertion, enforcing that it records exactly one
    /// result. Anything else is a bug in the assertion helper, not in the
    /// tree under test.
    fn record_assertion<F>(&mut self, assertion: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        let before = self.current()?.results.len();
        assertion(self)?;
        let after = self.current()?.results.len();

        if after != before + 1 {
            return Err(EngineError::AssertionResultCount {
                recorded: after.saturating_sub(before),
            });
        }
        Ok(())
    }

    // Consuming assertions

    /// Consume the next unconsumed node at this level, assert its kind
    /// (`None` is a wildcard), and run `nested` against its children.
    ///
    /// A kind mismatch is recorded as a `Fail`, but the nested results are
    /// still attached beneath it: one wrong node kind must not hide
    /// everything the spec says about that node's children.
    pub fn expect_kind<F>(&mut self, expected: Option<NodeKind>, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        let node: &'a Node = {
            let ctx = self.current()?;
            ctx.cursor += 1;
            let nodes: &'a [Node] = ctx.nodes;
            match nodes.get(ctx.cursor as usize) {
                Some(node) => node,
                None => {
                    let wanted = expected
                        .map_or_else(|| "a node".to_string(), |kind| kind.to_string());
                    ctx.results
                        .push(ResultNode::fail(format!("expected {wanted}, but no node is left")));
                    return Ok(());
                }
            }
        };

        trace!(name = %node.name, kind = %node.kind, "consuming node");

        self.stack.push(TestContext::new(node.children()));
        nested(self)?;
        let child_ctx = self.stack.pop().ok_or(EngineError::NoOpenContext)?;
        let count_node = child_ctx.close();

        let result = match expected {
            Some(kind) if kind != node.kind => ResultNode {
                outcome: Outcome::Fail,
                message: format!("expected {kind}, got {} '{}'", node.kind, node.name),
                children: vec![count_node],
            },
            _ => ResultNode::derived(format!("{} '{}'", node.kind, node.name), vec![count_node]),
        };
        self.current()?.results.push(result);
        Ok(())
    }

    /// Consume the next node whatever its kind.
    pub fn expect_any<F>(&mut self, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        self.expect_kind(None, nested)
    }

    /// Consume the next node, asserting it is a category.
    pub fn expect_category<F>(&mut self, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        self.expect_kind(Some(NodeKind::Category), nested)
    }

    /// Consume the next node, asserting it is a text channel.
    pub fn expect_text_channel<F>(&mut self, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        self.expect_kind(Some(NodeKind::Text), nested)
    }

    /// Consume the next node, asserting it is a news channel.
    pub fn expect_news_channel<F>(&mut self, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        self.expect_kind(Some(NodeKind::News), nested)
    }

    /// Consume the next node, asserting it is a voice channel.
    pub fn expect_voice_channel<F>(&mut self, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        self.expect_kind(Some(NodeKind::Voice), nested)
    }

    /// Consume the next node, asserting it is a stage channel.
    pub fn expect_stage_channel<F>(&mut self, nested: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        self.expect_kind(Some(NodeKind::Stage), nested)
    }

    /// Repeat `nested` until the current level has no unconsumed nodes.
    ///
    /// The body must consume at least one node per pass; a pass that leaves
    /// the cursor where it was would loop forever and aborts instead.
    pub fn for_each_remaining<F>(&mut self, mut nested: F) -> EngineResult<()>
    where
        F: FnMut(&mut Self) -> EngineResult<()>,
    {
        loop {
            let (before, remaining) = {
                let ctx = self.current()?;
                (ctx.cursor, ctx.nodes.len() as isize - ctx.cursor - 1)
            };
            if remaining <= 0 {
                return Ok(());
            }

            nested(self)?;

            if self.current()?.cursor <= before {
                return Err(EngineError::StalledLoop);
            }
        }
    }

    // Verifying assertions

    /// Assert the node under test has exactly this name (case-sensitive).
    pub fn expect_name(&mut self, expected: &str) -> EngineResult<()> {
        self.record_assertion(|runner| {
            let node = runner.subject()?;
            let result = if node.name == expected {
                ResultNode::pass(format!("name is '{expected}'"))
            } else {
                ResultNode::fail(format!("expected name '{expected}', got '{}'", node.name))
            };
            runner.current()?.results.push(result);
            Ok(())
        })
    }

    /// Assert the effective permissions of every guild role against the
    /// node under test.
    ///
    /// Each role's expected mask is its entry in `expected` (no entry means
    /// no flags), unioned with the everyone role's entry when
    /// `inherit_everyone` is set. The actual mask is resolved for that role
    /// alone through the full override layering. Expected names that match
    /// no guild role fail rather than crash.
    pub fn expect_permissions(
        &mut self,
        expected: &[(&str, PermissionSet)],
        inherit_everyone: bool,
    ) -> EngineResult<()> {
        self.record_assertion(|runner| {
            let node = runner.subject()?;
            let guild = runner.guild()?;
            let everyone = guild.everyone_role()?;

            let expectation_for = |name: &str| {
                expected
                    .iter()
                    .find(|(entry, _)| *entry == name)
                    .map(|(_, set)| set.clone())
                    .unwrap_or_default()
            };
            let everyone_expected = expectation_for(&everyone.name);

            let mut checks = Vec::new();
            for role in &guild.roles {
                let mut want = expectation_for(&role.name);
                if inherit_everyone {
                    want = want.union(&everyone_expected);
                }

                let role_ids = [role.id];
                let base = acl::role_base_permissions(guild, &role_ids)?;
                let actual =
                    acl::apply_role_overrides(&base, guild, &node.overrides, &role_ids)?;

                checks.push(match diff(&actual, &want) {
                    PermissionDiff::Equal => {
                        ResultNode::pass(format!("role '{}': permissions match", role.name))
                    }
                    changed => ResultNode::fail(format!("role '{}': {changed}", role.name)),
                });
            }

            for (name, _) in expected {
                if guild.role_by_name(name).is_none() {
                    checks.push(ResultNode::fail(format!(
                        "role '{name}' does not exist in the guild"
                    )));
                }
            }

            runner
                .current()?
                .results
                .push(ResultNode::derived("permissions per role", checks));
            Ok(())
        })
    }

    /// Assert the guild's role name set equals `expected` (unordered).
    pub fn expect_role_names(&mut self, expected: &[&str]) -> EngineResult<()> {
        self.record_assertion(|runner| {
            runner.require_nested()?;
            let guild = runner.guild()?;

            let mut actual: Vec<&str> = guild.roles.iter().map(|role| role.name.as_str()).collect();
            let mut wanted: Vec<&str> = expected.to_vec();
            actual.sort_unstable();
            wanted.sort_unstable();

            let result = if actual == wanted {
                ResultNode::pass(format!("role names match ({})", wanted.join(", ")))
            } else {
                ResultNode::fail(format!(
                    "expected roles [{}], got [{}]",
                    wanted.join(", "),
                    actual.join(", ")
                ))
            };
            runner.current()?.results.push(result);
            Ok(())
        })
    }

    /// Assert no two guild roles share a case-insensitively equal name.
    ///
    /// Fails on the first collision found.
    pub fn expect_unique_role_names(&mut self) -> EngineResult<()> {
        self.record_assertion(|runner| {
            runner.require_nested()?;
            let guild = runner.guild()?;

            let mut seen: Vec<(String, &str)> = Vec::new();
            let mut result = ResultNode::pass("role names are case-insensitively unique");
            for role in &guild.roles {
                let folded = role.name.to_lowercase();
                if let Some((_, first)) = seen.iter().find(|(key, _)| *key == folded) {
                    result = ResultNode::fail(format!(
                        "roles '{first}' and '{}' collide case-insensitively",
                        role.name
                    ));
                    break;
                }
                seen.push((folded, role.name.as_str()));
            }

            runner.current()?.results.push(result);
            Ok(())
        })
    }
}
