//! Renders a [`Module`] as an XML document.

use crate::syntax::syntax_tree::{
    declaration::{Class, Function, FunctionBody, VariableDecl},
    expression::Expression,
    module::Module,
    statement::{Block, Pattern, Statement},
    ConsList,
};

/// Declaration line of every rendered document.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>";

/// Renders the module as an XML document rooted at `<module>`.
#[must_use]
pub fn render_module(module: &Module) -> String {
    let mut writer = XmlWriter::default();
    writer.line(XML_DECLARATION);
    writer.element("module", |w| {
        w.text("name", module.name().as_str());

        w.element("dependencies", |w| {
            for import in module.imports() {
                w.text("dependency", &import.to_string());
            }
        });

        w.element("shadowtypes", |w| {
            for shadowtype in module.shadowtypes() {
                w.element("shadowtype", |w| {
                    w.text("name", shadowtype.name());
                    w.text("shadows", shadowtype.aliased_type());
                });
            }
        });

        w.element("types", |w| {
            for data_type in module.types() {
                w.element("type", |w| {
                    w.text("name", data_type.name());
                    w.element("options", |w| {
                        for option in data_type.options() {
                            w.element("option", |w| {
                                w.text("name", option.name());
                                w.text("typeExpression", &option.type_expression().to_string());
                            });
                        }
                    });
                });
            }
        });

        w.element("variables", |w| {
            for variable in module.variables() {
                w.variable(variable);
            }
        });

        w.element("classes", |w| {
            for class in module.classes() {
                w.class(class);
            }
        });

        w.element("functions", |w| {
            for function in module.functions() {
                w.function(function);
            }
        });
    });

    writer.output
}

/// Escapes the characters with a meaning in XML text.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Default)]
struct XmlWriter {
    output: String,
    depth: usize,
}

impl XmlWriter {
    fn line(&mut self, content: &str) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
        self.output.push_str(content);
        self.output.push('\n');
    }

    fn text(&mut self, tag: &str, content: &str) {
        self.line(&format!("<{tag}>{}</{tag}>", escape(content)));
    }

    fn element(&mut self, tag: &str, children: impl FnOnce(&mut Self)) {
        self.line(&format!("<{tag}>"));
        self.depth += 1;
        children(self);
        self.depth -= 1;
        self.line(&format!("</{tag}>"));
    }

    fn variable(&mut self, variable: &VariableDecl) {
        let tag = if variable.is_constant() {
            "constant"
        } else {
            "variable"
        };

        self.element(tag, |w| {
            w.text("name", variable.name());
            if let Some(declared_type) = variable.declared_type() {
                w.text("type", &declared_type.to_string());
            }
            w.expression_tree(variable.initializer());
        });
    }

    fn class(&mut self, class: &Class) {
        self.element("class", |w| {
            w.text("name", class.name());
            if let Some(docstring) = class.docstring() {
                w.text("docstring", docstring);
            }
            w.element("fields", |w| {
                for field in class.fields() {
                    w.variable(field);
                }
            });
            w.element("methods", |w| {
                for method in class.methods() {
                    w.function(method);
                }
            });
        });
    }

    fn function(&mut self, function: &Function) {
        self.element("function", |w| {
            w.text("name", function.name());
            if function.is_private() {
                w.text("visibility", "private");
            }
            if let Some(docstring) = function.docstring() {
                w.text("docstring", docstring);
            }
            w.element("parameters", |w| {
                for parameter in function.signature().inputs() {
                    w.element("parameter", |w| {
                        w.text("name", parameter.name());
                        w.text("type", &parameter.parameter_type().to_string());
                    });
                }
            });
            if let Some(returns) = function.signature().returns() {
                w.text("returns", &returns.to_string());
            }
            match function.body() {
                FunctionBody::Block(block) => w.block("body", block),
                FunctionBody::Expression(expression) => {
                    w.element("result", |w| w.expression_tree(expression));
                }
            }
        });
    }

    fn block(&mut self, tag: &str, block: &Block) {
        self.element(tag, |w| {
            for statement in block.statements() {
                w.statement(statement);
            }
        });
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Variable(variable) => self.variable(variable),
            Statement::While(while_loop) => self.element("while", |w| {
                w.element("condition", |w| w.expression_tree(while_loop.condition()));
                w.block("body", while_loop.block());
            }),
            Statement::For(for_loop) => self.element("for", |w| {
                w.text("binding", for_loop.binding());
                w.element("iterable", |w| w.expression_tree(for_loop.iterable()));
                w.block("body", for_loop.block());
            }),
            Statement::Return(value) => self.element("return", |w| w.expression_tree(value)),
            Statement::Match(match_statement) => self.element("match", |w| {
                w.element("subject", |w| w.expression_tree(match_statement.subject()));
                for case in match_statement.cases() {
                    w.element("case", |w| {
                        match case.pattern() {
                            Pattern::Wildcard => w.text("pattern", "_"),
                            Pattern::Value(value) => {
                                w.element("pattern", |w| w.expression_tree(value));
                            }
                        }
                        if let Some(guard) = case.guard() {
                            w.element("guard", |w| w.expression_tree(guard));
                        }
                        w.block("body", case.block());
                    });
                }
            }),
        }
    }

    fn expression_tree(&mut self, expression: &Expression) {
        self.element("exprTree", |w| match expression {
            Expression::Leaf(token) => w.text("root", &token.lexeme()),
            Expression::Unary(unary) => {
                w.text("root", expression.operation());
                w.element("left", |w| w.expression_tree(unary.operand()));
            }
            Expression::Binary(binary) => {
                w.text("root", expression.operation());
                w.element("left", |w| w.expression_tree(binary.left()));
                w.element("right", |w| w.expression_tree(binary.right()));
            }
            Expression::FunctionCall(call) => {
                w.text("root", call.name());
                for argument in call.arguments() {
                    w.element("argument", |w| w.expression_tree(argument));
                }
            }
            Expression::ListLiteral(elements) => {
                w.text("root", expression.operation());
                if let Some(list) = elements {
                    w.list_pair(list);
                }
            }
        });
    }

    fn list_pair(&mut self, list: &ConsList<Box<Expression>>) {
        self.element("listPair", |w| {
            w.element("head", |w| w.expression_tree(list.head()));
            if let Some(tail) = list.tail() {
                w.element("tail", |w| w.list_pair(tail));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::token::Token;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("a < b && c > \"d\" 'e'"),
            "a &lt; b &amp;&amp; c &gt; &quot;d&quot; &apos;e&apos;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_writer_indentation() {
        let mut writer = XmlWriter::default();
        writer.element("outer", |w| {
            w.text("inner", "1 < 2");
            w.element("empty", |_| {});
        });

        assert_eq!(
            writer.output,
            "<outer>\n  <inner>1 &lt; 2</inner>\n  <empty>\n  </empty>\n</outer>\n"
        );
    }

    #[test]
    fn test_string_leaf_is_bare() {
        let mut writer = XmlWriter::default();
        writer.expression_tree(&Expression::Leaf(Token::StringConst("a \"b\"".to_string())));

        assert_eq!(
            writer.output,
            "<exprTree>\n  <root>a &quot;b&quot;</root>\n</exprTree>\n"
        );
    }
}
