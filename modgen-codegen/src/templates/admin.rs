//! Admin dashboard pages: list, create and edit.
//!
//! Pages talk to the generated API through the shared JS SDK client and use
//! `@medusajs/ui` components. Pages of nested models read the parent id from
//! the route parameters.

use modgen_core::{FieldType, TypeMapper};

use super::Template;
use crate::{
    CodeFile, RawCode,
    ast::{Import, JsObject},
    builder::CodeBuilder,
    mappers::TsMapper,
    paths,
    schema::{Column, ModelSchema},
};

pub(super) struct AdminList<'a> {
    model: &'a ModelSchema,
}

pub(super) struct AdminCreate<'a> {
    model: &'a ModelSchema,
}

pub(super) struct AdminEdit<'a> {
    model: &'a ModelSchema,
}

impl<'a> AdminList<'a> {
    pub(super) fn new(model: &'a ModelSchema) -> Self {
        Self { model }
    }
}

impl<'a> AdminCreate<'a> {
    pub(super) fn new(model: &'a ModelSchema) -> Self {
        Self { model }
    }
}

impl<'a> AdminEdit<'a> {
    pub(super) fn new(model: &'a ModelSchema) -> Self {
        Self { model }
    }
}

fn parent_param(model: &ModelSchema) -> Option<&str> {
    model.parent.as_ref().map(|p| p.param.as_str())
}

fn sdk_import(path: &str) -> Import {
    Import::new(paths::relative_import(path, paths::ADMIN_SDK_FILE)).named("sdk")
}

/// `["vehicle-models", make_id]`
fn collection_query_key(model: &ModelSchema) -> String {
    match parent_param(model) {
        Some(param) => format!("[\"{}\", {param}]", model.plural.kebab),
        None => format!("[\"{}\"]", model.plural.kebab),
    }
}

/// The model as returned by the API.
fn item_type(model: &ModelSchema) -> RawCode {
    let mut b = CodeBuilder::typescript();
    b.push_block(&format!("type {} = {{", model.name.pascal), "};", |b| {
        b.push_line("id: string;");
        for column in model.columns() {
            b.push_line(&format!(
                "{}: {};",
                column.name,
                TsMapper.map_field(column.field_type, column.required)
            ));
        }
    });
    RawCode::new(b.build())
}

fn form_type_name(model: &ModelSchema) -> String {
    format!("{}Form", model.name.pascal)
}

/// Form state: every editable column, with empty strings for blank inputs.
fn form_type(model: &ModelSchema) -> RawCode {
    let mut b = CodeBuilder::typescript();
    b.push_block(&format!("type {} = {{", form_type_name(model)), "};", |b| {
        for column in model.editable_columns() {
            b.push_line(&format!(
                "{}: {};",
                column.name,
                TsMapper.map_type(column.field_type)
            ));
        }
    });
    RawCode::new(b.build())
}

fn empty_value(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String | FieldType::Date => "\"\"",
        FieldType::Number => "0",
        FieldType::Boolean => "false",
    }
}

fn empty_form(model: &ModelSchema) -> impl crate::builder::Renderable {
    model
        .editable_columns()
        .into_iter()
        .fold(JsObject::new(), |object, column| {
            object.raw(column.name, empty_value(column.field_type))
        })
        .wrap(&format!("const emptyForm: {} = ", form_type_name(model)), ";")
}

/// Optional text and date inputs are sent as null when left blank.
fn nullable_columns(model: &ModelSchema) -> Vec<Column> {
    model
        .editable_columns()
        .into_iter()
        .filter(|c| !c.required && matches!(c.field_type, FieldType::String | FieldType::Date))
        .collect()
}

fn to_body(model: &ModelSchema) -> Option<RawCode> {
    let nullable = nullable_columns(model);
    if nullable.is_empty() {
        return None;
    }
    let mut b = CodeBuilder::typescript();
    b.push_block(
        &format!("const toBody = (values: {}) => ({{", form_type_name(model)),
        "});",
        |b| {
            b.push_line("...values,");
            for column in &nullable {
                b.push_line(&format!("{0}: values.{0} || null,", column.name));
            }
        },
    );
    Some(RawCode::new(b.build()))
}

fn body_expr(model: &ModelSchema) -> &'static str {
    if nullable_columns(model).is_empty() {
        "values"
    } else {
        "toBody(values)"
    }
}

/// `@medusajs/ui` components used by a form page.
fn form_ui_import(model: &ModelSchema) -> Import {
    let columns = model.editable_columns();
    let has_input = columns.iter().any(|c| c.field_type != FieldType::Boolean);
    let has_switch = columns.iter().any(|c| c.field_type == FieldType::Boolean);

    let mut names = vec!["Button", "Container", "Heading"];
    if has_input {
        names.push("Input");
    }
    if !columns.is_empty() {
        names.push("Label");
    }
    if has_switch {
        names.push("Switch");
    }
    names.push("toast");
    Import::new("@medusajs/ui").named_all(names)
}

fn form_field(b: &mut CodeBuilder, column: &Column) {
    let name = &column.name;
    let label = format!("<Label htmlFor=\"{name}\">{}</Label>", column.label);

    if column.field_type == FieldType::Boolean {
        b.push_block("<div className=\"flex items-center gap-x-2\">", "</div>", |b| {
            b.push_block("<Switch", "/>", |b| {
                b.push_line(&format!("id=\"{name}\""))
                    .push_line(&format!("checked={{form.{name}}}"))
                    .push_line(&format!(
                        "onCheckedChange={{(checked) => setForm({{ ...form, {name}: checked }})}}"
                    ));
            });
            b.push_line(&label);
        });
        return;
    }

    let (input_type, value) = match column.field_type {
        FieldType::Number => (Some("number"), "Number(e.target.value)"),
        FieldType::Date => (Some("date"), "e.target.value"),
        _ => (None, "e.target.value"),
    };
    b.push_block("<div className=\"flex flex-col gap-y-2\">", "</div>", |b| {
        b.push_line(&label);
        b.push_block("<Input", "/>", |b| {
            b.push_line(&format!("id=\"{name}\""));
            if let Some(input_type) = input_type {
                b.push_line(&format!("type=\"{input_type}\""));
            }
            if column.required {
                b.push_line("required");
            }
            b.push_line(&format!("value={{form.{name}}}"))
                .push_line(&format!(
                    "onChange={{(e) => setForm({{ ...form, {name}: {value} }})}}"
                ));
        });
    });
}

/// `<form>` element with every editable column and the action buttons.
fn form_element(
    b: &mut CodeBuilder,
    model: &ModelSchema,
    mutation: &str,
    buttons: impl FnOnce(&mut CodeBuilder),
) {
    b.push_line("<form");
    b.push_indent()
        .push_line("className=\"flex flex-col gap-y-4 px-6 py-4\"");
    b.push_block("onSubmit={(e) => {", "}}", |b| {
        b.push_line("e.preventDefault();")
            .push_line(&format!("{mutation}.mutate(form);"));
    });
    b.push_dedent().push_line(">");
    b.push_indent();
    for column in model.editable_columns() {
        form_field(b, &column);
    }
    b.push_block("<div className=\"flex justify-end gap-x-2\">", "</div>", buttons);
    b.push_dedent().push_line("</form>");
}

fn toast_callbacks(b: &mut CodeBuilder, model: &ModelSchema, message: &str) {
    b.push_block("onSuccess: () => {", "},", |b| {
        b.push_line(&format!(
            "queryClient.invalidateQueries({{ queryKey: [\"{}\"] }});",
            model.plural.kebab
        ))
        .push_line(&format!(
            "toast.success(\"{} {message}\");",
            model.singular.title
        ))
        .push_line(&format!("navigate({});", paths::admin_url(model)));
    });
    b.push_block("onError: (error: Error) => {", "},", |b| {
        b.push_line("toast.error(error.message);");
    });
}

/// Booleans read as Yes/No in list cells.
fn cell_value(var: &str, column: &Column) -> String {
    if column.field_type == FieldType::Boolean {
        format!("{var}.{} ? \"Yes\" : \"No\"", column.name)
    } else {
        format!("{var}.{}", column.name)
    }
}

fn heading(b: &mut CodeBuilder, title: &str) {
    b.push_block("<div className=\"px-6 py-4\">", "</div>", |b| {
        b.push_line(&format!("<Heading level=\"h2\">{title}</Heading>"));
    });
}

impl Template for AdminList<'_> {
    fn path(&self) -> String {
        format!("{}/page.tsx", paths::admin_dir(self.model))
    }

    fn render(&self) -> String {
        let model = self.model;
        let path = self.path();
        let plural = model.service_plural();
        let component = format!("{plural}Page");
        let response = format!("{plural}Response");
        let var = &model.name.camel;
        let columns = model.editable_columns();
        let parent = parent_param(model);

        let mut response_type = CodeBuilder::typescript();
        response_type.push_block(&format!("type {response} = {{"), "};", |b| {
            b.push_line(&format!("{}: {}[];", model.plural.snake, model.name.pascal))
                .push_line("count: number;");
        });

        let mut page = CodeBuilder::typescript();
        page.push_block(&format!("const {component} = () => {{"), "};", |b| {
            if let Some(param) = parent {
                b.push_line(&format!("const {{ {param} }} = useParams();"));
            }
            b.push_block(
                &format!("const {{ data, isLoading }} = useQuery<{response}>({{"),
                "});",
                |b| {
                    b.push_line(&format!("queryKey: {},", collection_query_key(model)))
                        .push_line(&format!(
                            "queryFn: () => sdk.client.fetch({}),",
                            paths::api_url(model)
                        ));
                },
            );
            b.push_blank();
            b.push_block("return (", ");", |b| {
                b.push_block("<Container className=\"divide-y p-0\">", "</Container>", |b| {
                    b.push_block(
                        "<div className=\"flex items-center justify-between px-6 py-4\">",
                        "</div>",
                        |b| {
                            b.push_line(&format!(
                                "<Heading level=\"h2\">{}</Heading>",
                                model.plural.title
                            ));
                            b.push_block(
                                "<Button size=\"small\" variant=\"secondary\" asChild>",
                                "</Button>",
                                |b| {
                                    b.push_line("<Link to=\"create\">Create</Link>");
                                },
                            );
                        },
                    );
                    b.push_line("{isLoading ? (");
                    b.push_indent()
                        .push_line("<div className=\"px-6 py-4\">Loading...</div>")
                        .push_dedent();
                    b.push_line(") : (");
                    b.push_indent();
                    b.push_block("<Table>", "</Table>", |b| {
                        b.push_block("<Table.Header>", "</Table.Header>", |b| {
                            b.push_block("<Table.Row>", "</Table.Row>", |b| {
                                for column in &columns {
                                    b.push_line(&format!(
                                        "<Table.HeaderCell>{}</Table.HeaderCell>",
                                        column.label
                                    ));
                                }
                                b.push_line("<Table.HeaderCell />");
                            });
                        });
                        b.push_block("<Table.Body>", "</Table.Body>", |b| {
                            b.push_block(
                                &format!("{{data?.{}.map(({var}) => (", model.plural.snake),
                                "))}",
                                |b| {
                                    b.push_block(
                                        &format!("<Table.Row key={{{var}.id}}>"),
                                        "</Table.Row>",
                                        |b| {
                                            for column in &columns {
                                                b.push_line(&format!(
                                                    "<Table.Cell>{{{}}}</Table.Cell>",
                                                    cell_value(var, column)
                                                ));
                                            }
                                            b.push_block("<Table.Cell>", "</Table.Cell>", |b| {
                                                b.push_line(&format!(
                                                    "<Link to={{`${{{var}.id}}/edit`}}>Edit</Link>"
                                                ));
                                            });
                                        },
                                    );
                                },
                            );
                        });
                    });
                    b.push_dedent().push_line(")}");
                });
            });
        });

        let mut router = Import::new("react-router-dom").named("Link");
        if parent.is_some() {
            router = router.named("useParams");
        }

        let mut file = CodeFile::new();
        if parent.is_none() {
            file = file.import(Import::new("@medusajs/admin-sdk").named("defineRouteConfig"));
        }
        file = file
            .import(
                Import::new("@medusajs/ui").named_all(["Button", "Container", "Heading", "Table"]),
            )
            .import(Import::new("@tanstack/react-query").named("useQuery"))
            .import(router)
            .import(sdk_import(&path))
            .add(item_type(model))
            .add(RawCode::new(response_type.build()))
            .add(RawCode::new(page.build()));

        // Only top-level collections get a sidebar entry.
        if parent.is_none() {
            file = file.add(
                JsObject::new()
                    .string("label", model.plural.title.clone())
                    .wrap("export const config = defineRouteConfig(", ");"),
            );
        }

        file.add(RawCode::new(format!("export default {component};")))
            .render()
    }
}

impl Template for AdminCreate<'_> {
    fn path(&self) -> String {
        format!("{}/create/page.tsx", paths::admin_dir(self.model))
    }

    fn render(&self) -> String {
        let model = self.model;
        let path = self.path();
        let component = format!("Create{}Page", model.name.pascal);
        let form_name = form_type_name(model);
        let parent = parent_param(model);

        let mut page = CodeBuilder::typescript();
        page.push_block(&format!("const {component} = () => {{"), "};", |b| {
            if let Some(param) = parent {
                b.push_line(&format!("const {{ {param} }} = useParams();"));
            }
            b.push_line("const navigate = useNavigate();")
                .push_line("const queryClient = useQueryClient();")
                .push_line(&format!(
                    "const [form, setForm] = useState<{form_name}>(emptyForm);"
                ))
                .push_blank();
            b.push_block("const create = useMutation({", "});", |b| {
                b.push_line(&format!("mutationFn: (values: {form_name}) =>"));
                b.push_indent()
                    .push_line(&format!(
                        "sdk.client.fetch({}, {{ method: \"POST\", body: {} }}),",
                        paths::api_url(model),
                        body_expr(model)
                    ))
                    .push_dedent();
                toast_callbacks(b, model, "created");
            });
            b.push_blank();
            b.push_block("return (", ");", |b| {
                b.push_block("<Container className=\"divide-y p-0\">", "</Container>", |b| {
                    heading(b, &format!("Create {}", model.singular.title));
                    form_element(b, model, "create", |b| {
                        b.push_block(
                            "<Button type=\"submit\" isLoading={create.isPending}>",
                            "</Button>",
                            |b| {
                                b.push_line("Create");
                            },
                        );
                    });
                });
            });
        });

        let mut router = Import::new("react-router-dom").named("useNavigate");
        if parent.is_some() {
            router = router.named("useParams");
        }

        let mut file = CodeFile::new()
            .import(form_ui_import(model))
            .import(
                Import::new("@tanstack/react-query").named_all(["useMutation", "useQueryClient"]),
            )
            .import(Import::new("react").named("useState"))
            .import(router)
            .import(sdk_import(&path))
            .add(form_type(model))
            .add(empty_form(model));
        if let Some(to_body) = to_body(model) {
            file = file.add(to_body);
        }
        file.add(RawCode::new(page.build()))
            .add(RawCode::new(format!("export default {component};")))
            .render()
    }
}

/// Expression turning the fetched value of `column` into form state.
fn populate_expr(var: &str, column: &Column) -> String {
    let value = format!("data.{var}.{}", column.name);
    match (column.field_type, column.required) {
        (FieldType::Date, _) => format!("({value} ?? \"\").slice(0, 10)"),
        (_, true) => value,
        (field_type, false) => format!("{value} ?? {}", empty_value(field_type)),
    }
}

impl Template for AdminEdit<'_> {
    fn path(&self) -> String {
        format!("{}/[id]/edit/page.tsx", paths::admin_dir(self.model))
    }

    fn render(&self) -> String {
        let model = self.model;
        let path = self.path();
        let component = format!("Edit{}Page", model.name.pascal);
        let form_name = form_type_name(model);
        let item = &model.name.snake;
        let item_url = paths::api_item_url(model, "id");

        let mut page = CodeBuilder::typescript();
        page.push_block(&format!("const {component} = () => {{"), "};", |b| {
            match parent_param(model) {
                Some(param) => b.push_line(&format!("const {{ {param}, id }} = useParams();")),
                None => b.push_line("const { id } = useParams();"),
            };
            b.push_line("const navigate = useNavigate();")
                .push_line("const queryClient = useQueryClient();")
                .push_line(&format!(
                    "const [form, setForm] = useState<{form_name}>(emptyForm);"
                ))
                .push_blank();
            b.push_block(
                &format!(
                    "const {{ data, isLoading }} = useQuery<{{ {item}: {} }}>({{",
                    model.name.pascal
                ),
                "});",
                |b| {
                    b.push_line(&format!("queryKey: [\"{}\", id],", model.plural.kebab))
                        .push_line(&format!("queryFn: () => sdk.client.fetch({item_url}),"));
                },
            );
            b.push_blank();
            b.push_block("useEffect(() => {", "}, [data]);", |b| {
                b.push_block(&format!("if (data?.{item}) {{"), "}", |b| {
                    b.push_block("setForm({", "});", |b| {
                        for column in model.editable_columns() {
                            b.push_line(&format!(
                                "{}: {},",
                                column.name,
                                populate_expr(item, &column)
                            ));
                        }
                    });
                });
            });
            b.push_blank();
            b.push_block("const update = useMutation({", "});", |b| {
                b.push_line(&format!("mutationFn: (values: {form_name}) =>"));
                b.push_indent()
                    .push_line(&format!(
                        "sdk.client.fetch({item_url}, {{ method: \"POST\", body: {} }}),",
                        body_expr(model)
                    ))
                    .push_dedent();
                toast_callbacks(b, model, "updated");
            });
            b.push_blank();
            b.push_block("const remove = useMutation({", "});", |b| {
                b.push_line(&format!(
                    "mutationFn: () => sdk.client.fetch({item_url}, {{ method: \"DELETE\" }}),"
                ));
                toast_callbacks(b, model, "deleted");
            });
            b.push_blank();
            b.push_block("if (isLoading) {", "}", |b| {
                b.push_line("return <Container className=\"px-6 py-4\">Loading...</Container>;");
            });
            b.push_blank();
            b.push_block("return (", ");", |b| {
                b.push_block("<Container className=\"divide-y p-0\">", "</Container>", |b| {
                    heading(b, &format!("Edit {}", model.singular.title));
                    form_element(b, model, "update", |b| {
                        b.push_line("<Button");
                        b.push_indent()
                            .push_line("type=\"button\"")
                            .push_line("variant=\"danger\"")
                            .push_line("isLoading={remove.isPending}")
                            .push_line("onClick={() => remove.mutate()}")
                            .push_dedent();
                        b.push_line(">");
                        b.push_indent().push_line("Delete").push_dedent();
                        b.push_line("</Button>");
                        b.push_block(
                            "<Button type=\"submit\" isLoading={update.isPending}>",
                            "</Button>",
                            |b| {
                                b.push_line("Save");
                            },
                        );
                    });
                });
            });
        });

        let mut file = CodeFile::new()
            .import(form_ui_import(model))
            .import(
                Import::new("@tanstack/react-query")
                    .named_all(["useMutation", "useQuery", "useQueryClient"]),
            )
            .import(Import::new("react").named_all(["useEffect", "useState"]))
            .import(Import::new("react-router-dom").named_all(["useNavigate", "useParams"]))
            .import(sdk_import(&path))
            .add(item_type(model))
            .add(form_type(model))
            .add(empty_form(model));
        if let Some(to_body) = to_body(model) {
            file = file.add(to_body);
        }
        file.add(RawCode::new(page.build()))
            .add(RawCode::new(format!("export default {component};")))
            .render()
    }
}
