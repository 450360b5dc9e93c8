pub(super) const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>BackFire</title>
<style>
body{font-family:sans-serif;background:#1b0f0a;color:#f4e6d8;margin:0;padding:2em 1em}
main{max-width:22em;margin:auto}
h1{color:#ff7a1a;font-size:1.6em}
label{display:block;margin-top:1em}
input{width:100%;box-sizing:border-box;padding:.6em;margin-top:.3em;border:0;border-radius:4px}
button{width:100%;margin-top:1.5em;padding:.8em;border:0;border-radius:4px;background:#ff7a1a;color:#1b0f0a;font-weight:bold}
</style>
</head>
<body>
<main>
<h1>BackFire</h1>
<p>Connect the fire to your Wi-Fi network.</p>
<form method="POST" action="/wifisave">
<label>Network name<input name="s" maxlength="32" autocapitalize="none" autocorrect="off" required></label>
<label>Password<input name="p" type="password" maxlength="64"></label>
<button type="submit">Save</button>
</form>
</main>
</body>
</html>
"#;

pub(super) const SAVED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>BackFire</title>
</head>
<body style="font-family:sans-serif;background:#1b0f0a;color:#f4e6d8;padding:2em 1em">
<h1 style="color:#ff7a1a">Saved</h1>
<p>BackFire is restarting and will join your network. If it cannot connect,
the BackFire access point comes back.</p>
</body>
</html>
"#;
