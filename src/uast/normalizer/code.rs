use text_size::TextRange;

use super::{Collected, EnumNormalizer};
use crate::frontend::{Delimited, FragmentShape, Frontend, TypeInfo};
use crate::uast::error::{Result, UastError};
use crate::uast::kind::NodeKind;
use crate::uast::node::{NodePath, UastNode};

/// One child of a compound node before lowering
enum Piece<F> {
    Fragment(F),
    Leaf(NodeKind, TextRange),
    Type(TypeInfo),
    Arguments(Delimited<F>),
    Body(Delimited<F>),
}

impl<F: Frontend> EnumNormalizer<'_, '_, F> {
    /// Statement block. Empty when body normalization is off.
    pub(super) fn block(
        &self,
        body: Delimited<F::Fragment>,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let mut children = Vec::new();
        if self.config.normalize_bodies {
            children.reserve(body.items.len());
            for statement in &body.items {
                let statement_path = path.child(children.len());
                children.push(self.lower(statement, &statement_path, depth, out)?);
            }
        }
        self.factory.node(NodeKind::Block, body.range, children)
    }

    pub(super) fn block_statement(
        &self,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        match self.frontend.body(fragment) {
            Some(body) => self.block(body, path, depth, out),
            None => Err(UastError::malformed(
                NodeKind::Block,
                self.frontend.range(fragment),
                "block without braces",
            )),
        }
    }

    /// Argument list of a constant, call or object creation
    pub(super) fn arguments(
        &self,
        arguments: Delimited<F::Fragment>,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let mut children = Vec::with_capacity(arguments.items.len());
        for argument in &arguments.items {
            let argument_path = path.child(children.len());
            children.push(self.lower(argument, &argument_path, depth, out)?);
        }
        self.factory.node(NodeKind::Arguments, arguments.range, children)
    }

    /// Binary expression. A left-nested chain such as `a + b + c + ...` is
    /// lowered bottom-up in a loop at one depth; only right operands recurse.
    pub(super) fn binary_chain(
        &self,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let mut spine = vec![(fragment.clone(), path.clone())];
        while let Some((top, top_path)) = spine.last() {
            match self.left_binary_operand(top) {
                Some(left) => {
                    let left_path = top_path.child(0);
                    spine.push((left, left_path));
                }
                None => break,
            }
        }

        let mut lowered = None;
        while let Some((binary, binary_path)) = spine.pop() {
            let node = self.compound_with_left(
                NodeKind::BinaryExpression,
                &binary,
                &binary_path,
                depth,
                lowered.take(),
                out,
            )?;
            lowered = Some(node);
        }
        lowered.ok_or_else(|| {
            UastError::malformed(
                NodeKind::BinaryExpression,
                self.frontend.range(fragment),
                "empty expression",
            )
        })
    }

    /// First operand of a binary fragment when it is itself binary
    fn left_binary_operand(&self, fragment: &F::Fragment) -> Option<F::Fragment> {
        let fe = self.frontend;
        fe.operands(fragment)
            .into_iter()
            .min_by_key(|f| fe.range(f).start())
            .filter(|f| fe.shape(f) == FragmentShape::Binary)
    }

    /// Statements and expressions made of sub-fragments plus text leaves.
    /// Children are ordered by source position.
    pub(super) fn compound(
        &self,
        kind: NodeKind,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        self.compound_with_left(kind, fragment, path, depth, None, out)
    }

    /// `compound` where the leftmost operand may already be lowered
    fn compound_with_left(
        &self,
        kind: NodeKind,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        lowered_left: Option<UastNode>,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let fe = self.frontend;
        let shape = fe.shape(fragment);
        let mut pieces: Vec<Piece<F::Fragment>> =
            fe.operands(fragment).into_iter().map(Piece::Fragment).collect();

        match shape {
            FragmentShape::Assignment | FragmentShape::Binary | FragmentShape::Unary => {
                if let Some(operator) = fe.operator(fragment) {
                    pieces.push(Piece::Leaf(NodeKind::Operator, operator));
                }
                // `x instanceof T`
                if let Some(ty) = fe.type_ref(fragment) {
                    pieces.push(Piece::Type(ty));
                }
            }
            FragmentShape::Call => {
                if let Some(arguments) = fe.arguments(fragment) {
                    pieces.push(Piece::Arguments(arguments));
                }
            }
            FragmentShape::FieldAccess => {
                if let Some(name) = fe.name(fragment) {
                    pieces.push(Piece::Leaf(NodeKind::Identifier, name));
                }
            }
            FragmentShape::ObjectCreation => {
                if let Some(ty) = fe.type_ref(fragment) {
                    pieces.push(Piece::Type(ty));
                }
                if let Some(arguments) = fe.arguments(fragment) {
                    pieces.push(Piece::Arguments(arguments));
                }
                if let Some(body) = fe.class_body(fragment) {
                    pieces.push(Piece::Body(body));
                }
            }
            _ => {}
        }

        pieces.sort_by_key(|piece| match piece {
            Piece::Fragment(f) => fe.range(f).start(),
            Piece::Leaf(_, range) => range.start(),
            Piece::Type(ty) => ty.range.start(),
            Piece::Arguments(d) | Piece::Body(d) => d.range.start(),
        });

        let mut children = Vec::with_capacity(pieces.len());
        let mut pieces = pieces.into_iter();
        if let Some(left) = lowered_left {
            pieces.next();
            children.push(left);
        }
        for piece in pieces {
            let child_path = path.child(children.len());
            let child = match piece {
                Piece::Fragment(f) => self.lower(&f, &child_path, depth, out)?,
                Piece::Leaf(leaf_kind, range) => self.factory.leaf(leaf_kind, range)?,
                Piece::Type(ty) => self.type_reference(ty)?,
                Piece::Arguments(d) => self.arguments(d, &child_path, depth, out)?,
                Piece::Body(d) => self.anonymous_class(d, &child_path, depth, out)?,
            };
            children.push(child);
        }
        self.factory.node(kind, fe.range(fragment), children)
    }
}
