use axum::response::Html;

pub const UPLOAD_FORM: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Upload Excel for Optimization</title>
</head>
<body>
    <h2>Upload Excel for Optimization</h2>
    <form method="post" action="/" enctype="multipart/form-data">
        <input type="file" name="excel_file" accept=".xlsx,.xls,.xlsm,.ods" required>
        <button type="submit">Run Optimization</button>
    </form>
</body>
</html>
"#;

pub async fn upload_form_handler() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
