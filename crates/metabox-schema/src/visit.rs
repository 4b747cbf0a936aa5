use crate::error::ErrorTree;

///
/// ValidateNode
///
/// Local, structural validation for one schema node. Nodes report every
/// problem they can see; cross-node invariants live in `validate`.
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// VisitableNode
///

pub trait VisitableNode: ValidateNode {
    /// Route segment contributed by this node; empty segments are skipped.
    fn route_key(&self) -> String {
        String::new()
    }

    /// Drive the visitor into child nodes.
    fn drive<V: Visitor>(&self, v: &mut V) {
        let _ = v;
    }

    fn accept<V: Visitor>(&self, v: &mut V)
    where
        Self: Sized,
    {
        v.enter(&self.route_key());
        v.visit(self);
        self.drive(v);
        v.exit();
    }
}

///
/// Visitor
///

pub trait Visitor {
    fn enter(&mut self, segment: &str);
    fn exit(&mut self);
    fn visit(&mut self, node: &dyn ValidateNode);
}

///
/// ValidateVisitor
/// Collects per-node validation failures with their schema routes.
///

#[derive(Default)]
pub struct ValidateVisitor {
    pub errors: ErrorTree,
    route: Vec<String>,
}

impl ValidateVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn current_route(&self) -> String {
        self.route
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Visitor for ValidateVisitor {
    fn enter(&mut self, segment: &str) {
        self.route.push(segment.to_string());
    }

    fn exit(&mut self) {
        self.route.pop();
    }

    fn visit(&mut self, node: &dyn ValidateNode) {
        if let Err(tree) = node.validate() {
            self.errors.merge(&self.current_route(), tree);
        }
    }
}
