//! Inline chat page served at `/`.

/// Render the chat page. `addr` is the host:port the browser dials back
/// to for the websocket.
pub fn render(addr: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Parlor</title>
<meta charset="utf-8" />
<style>
body {{ font-family: monospace; background: #1a1a2e; color: #eee; padding: 20px; max-width: 700px; margin: 0 auto; }}
h1 {{ color: #f39c12; }}
#output {{ background: #0f3460; padding: 15px; border-radius: 8px; min-height: 240px; max-height: 420px; overflow-y: auto; white-space: pre-wrap; font-size: 14px; }}
input[type=text] {{ width: 80%; background: #0f3460; color: #eee; border: 1px solid #333; border-radius: 4px; padding: 8px; font-size: 14px; }}
button {{ background: #f39c12; border: none; padding: 8px 16px; border-radius: 4px; cursor: pointer; font-size: 14px; }}
button:hover {{ background: #e67e22; }}
.status {{ color: #3498db; }}
</style></head><body>
<h1>Parlor v{version}</h1>
<div id="output"></div>
<p><input type="text" id="input" placeholder="Say something..." /> <button id="send">Send</button></p>
<script>
const output = document.getElementById('output');
const input = document.getElementById('input');
const send = document.getElementById('send');
function line(text, cls) {{
    const p = document.createElement('p');
    p.textContent = text;
    if (cls) p.className = cls;
    output.appendChild(p);
    output.scrollTop = output.scrollHeight;
}}
const ws = new WebSocket('ws://{addr}/socket');
ws.onopen = () => line('connected', 'status');
ws.onclose = () => line('disconnected', 'status');
ws.onmessage = (e) => line(e.data);
function doSend() {{
    if (ws.readyState !== 1 || !input.value.trim()) return;
    line('> ' + input.value);
    ws.send(input.value);
    input.value = '';
}}
send.onclick = doSend;
input.addEventListener('keydown', (e) => {{ if (e.key === 'Enter') doSend(); }});
</script></body></html>"#,
        version = env!("CARGO_PKG_VERSION"),
        addr = addr,
    )
}
