//! Static pieces of the gallery page.

pub(super) const STYLE: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background: #111; color: #eee; }
header { padding: 1.5rem 2rem; display: flex; align-items: baseline; gap: 1rem; border-bottom: 1px solid #333; }
header h1 { font-size: 1.6rem; font-weight: 600; }
header .count { color: #999; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; padding: 1.5rem 2rem; }
.card { background: #1c1c1c; border-radius: 8px; overflow: hidden; cursor: pointer; transition: transform .15s; }
.card:hover { transform: scale(1.02); }
.card img { width: 100%; aspect-ratio: 4 / 3; object-fit: cover; display: block; }
.card .meta { padding: .5rem .75rem; font-size: .85rem; color: #aaa; display: flex; justify-content: space-between; }
.empty { text-align: center; padding: 6rem 2rem; color: #777; }
.empty p { margin-top: .5rem; }
#lightbox { position: fixed; inset: 0; background: rgba(0, 0, 0, .92); display: none; align-items: center; justify-content: center; flex-direction: column; }
#lightbox.open { display: flex; }
#lightbox img { max-width: 90vw; max-height: 82vh; border-radius: 4px; }
#lightbox-caption { margin-top: .75rem; color: #bbb; }
#lightbox button { position: absolute; background: none; border: none; color: #fff; font-size: 2.5rem; cursor: pointer; padding: 1rem; }
#lightbox-close { top: .5rem; right: 1rem; }
#lightbox-prev { left: 1rem; top: 50%; transform: translateY(-50%); }
#lightbox-next { right: 1rem; top: 50%; transform: translateY(-50%); }
"#;

/// Lightbox behaviour. Reads `PHOTOS`, where every entry carries the
/// indices of its neighbours.
pub(super) const SCRIPT: &str = r#"
(function () {
  var box = document.getElementById('lightbox');
  var img = document.getElementById('lightbox-img');
  var caption = document.getElementById('lightbox-caption');
  var current = null;

  function show(i) {
    var photo = PHOTOS[i];
    if (!photo) return;
    current = i;
    img.src = photo.url;
    img.alt = photo.filename;
    caption.textContent = photo.date;
    box.classList.add('open');
  }
  function close() {
    current = null;
    box.classList.remove('open');
    img.removeAttribute('src');
  }
  function next() { if (current !== null) show(PHOTOS[current].next); }
  function prev() { if (current !== null) show(PHOTOS[current].prev); }

  document.querySelectorAll('.card').forEach(function (card) {
    card.addEventListener('click', function () { show(Number(card.dataset.index)); });
  });
  document.getElementById('lightbox-close').addEventListener('click', close);
  document.getElementById('lightbox-prev').addEventListener('click', function (e) { e.stopPropagation(); prev(); });
  document.getElementById('lightbox-next').addEventListener('click', function (e) { e.stopPropagation(); next(); });
  box.addEventListener('click', function (e) { if (e.target === box) close(); });
  document.addEventListener('keydown', function (e) {
    if (current === null) return;
    if (e.key === 'Escape') close();
    else if (e.key === 'ArrowLeft') prev();
    else if (e.key === 'ArrowRight') next();
  });
})();
"#;

pub(super) const LIGHTBOX: &str = r#"
<div id="lightbox" role="dialog" aria-modal="true">
  <button id="lightbox-close" aria-label="Close">&times;</button>
  <button id="lightbox-prev" aria-label="Previous">&#8249;</button>
  <img id="lightbox-img" alt="">
  <div id="lightbox-caption"></div>
  <button id="lightbox-next" aria-label="Next">&#8250;</button>
</div>
"#;
