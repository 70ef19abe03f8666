//! The single HTML page. All state lives in the JSON API; the page keeps a
//! local mirror, applies mutations optimistically, and re-reads server state
//! when the month changes. A 401 from any call drops back to the login form.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --ink: #24292f;
      --muted: #6b7280;
      --accent: #2563eb;
      --good: #16a34a;
      --bad: #dc2626;
      --line: #e5e7eb;
    }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      min-height: 100vh;
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      color: var(--ink);
      background: #f3f4f6;
      padding: 24px 16px;
    }
    .card {
      background: white;
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 20px;
      margin: 0 auto 16px;
      max-width: 1100px;
    }
    h1 { margin: 0 0 4px; font-size: 1.6rem; }
    .muted { color: var(--muted); font-size: 0.9rem; }
    button {
      border: 1px solid var(--line);
      background: white;
      border-radius: 6px;
      padding: 6px 12px;
      cursor: pointer;
      font-size: 0.9rem;
    }
    button.primary { background: var(--accent); border-color: var(--accent); color: white; }
    button.danger { color: var(--bad); }
    input, select {
      border: 1px solid var(--line);
      border-radius: 6px;
      padding: 7px 10px;
      font-size: 0.95rem;
    }
    .row { display: flex; gap: 8px; flex-wrap: wrap; align-items: center; }
    .spread { justify-content: space-between; }
    #login-card { max-width: 360px; }
    #login-card form { display: grid; gap: 10px; margin-top: 12px; }
    .error { color: var(--bad); font-size: 0.9rem; min-height: 1.1em; }
    table { border-collapse: collapse; width: 100%; margin-top: 12px; }
    th, td { border: 1px solid var(--line); padding: 4px; text-align: center; font-size: 0.8rem; }
    td.name { text-align: left; padding: 6px 10px; font-size: 0.9rem; white-space: nowrap; }
    .day-btn {
      width: 26px; height: 26px; padding: 0; border-radius: 4px;
    }
    .day-btn.done { background: var(--good); border-color: var(--good); color: white; }
    .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 10px; margin-top: 12px; }
    .stat { border: 1px solid var(--line); border-radius: 8px; padding: 10px; }
    .stat .value { font-size: 1.4rem; font-weight: 600; }
    .bar { background: var(--line); border-radius: 999px; height: 8px; overflow: hidden; margin-top: 6px; }
    .bar > div { background: var(--accent); height: 100%; }
    .hidden { display: none; }
  </style>
</head>
<body>
  <div id="login-card" class="card">
    <h1>Habit Tracker</h1>
    <p class="muted">Sign in to track habits and sleep.</p>
    <form id="auth-form">
      <input id="auth-username" placeholder="Username" autocomplete="username" />
      <input id="auth-password" type="password" placeholder="Password" autocomplete="current-password" />
      <div class="error" id="auth-error"></div>
      <button class="primary" type="submit" id="auth-submit">Login</button>
      <button type="button" id="auth-mode">Need an account? Register</button>
    </form>
  </div>

  <div id="app" class="hidden">
    <div class="card row spread">
      <div>
        <h1>Habit Tracker</h1>
        <span class="muted" id="welcome"></span>
      </div>
      <div class="row">
        <button id="prev-month">&larr;</button>
        <strong id="month-title"></strong>
        <button id="next-month">&rarr;</button>
        <button id="tab-tracker" class="primary">Tracker</button>
        <button id="tab-report">Yearly report</button>
        <button id="logout">Logout</button>
      </div>
    </div>

    <div id="tracker-view">
      <div class="card">
        <div class="row">
          <input id="new-habit" placeholder="Add a habit (e.g. Read, Run)" style="flex:1" />
          <button class="primary" id="add-habit">Add</button>
        </div>
        <div id="grid"></div>
        <div class="stats" id="month-stats"></div>
      </div>
      <div class="card">
        <h1 style="font-size:1.1rem">Sleep (hours per night)</h1>
        <div id="sleep-grid"></div>
      </div>
    </div>

    <div id="report-view" class="card hidden"></div>
  </div>

  <script>
    const HOURS = [4, 4.5, 5, 5.5, 6, 6.5, 7, 7.5, 8];
    let token = localStorage.getItem('token');
    let user = JSON.parse(localStorage.getItem('user') || 'null');
    let now = new Date();
    let year = now.getFullYear();
    let month = now.getMonth() + 1;
    let habits = [];
    let sleepDays = {};
    let registering = false;

    const $ = (id) => document.getElementById(id);
    const daysInMonth = () => new Date(year, month, 0).getDate();

    const api = async (path, options = {}) => {
      const headers = { 'content-type': 'application/json' };
      if (token) headers['x-auth-token'] = token;
      const res = await fetch('/api' + path, { ...options, headers });
      if (res.status === 401 && token) { logout(); throw new Error('session expired'); }
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.message || 'request failed');
      }
      return res.json();
    };

    const logout = () => {
      localStorage.removeItem('token');
      localStorage.removeItem('user');
      token = null; user = null; habits = []; sleepDays = {};
      $('app').classList.add('hidden');
      $('login-card').classList.remove('hidden');
    };

    const loadMonth = async () => {
      try { habits = await api(`/habits/${year}/${month}`); }
      catch (err) { console.error('failed to load habits:', err); habits = []; }
      try { sleepDays = (await api(`/sleep/${year}/${month}`)).days || {}; }
      catch (err) { console.error('failed to load sleep data:', err); sleepDays = {}; }
      renderTracker();
    };

    // Fire-and-forget; optimistic local state is kept even if these fail.
    const saveHabits = () => {
      const payload = habits.map((h) => ({ name: h.name, completions: h.completions }));
      api(`/habits/${year}/${month}`, { method: 'POST', body: JSON.stringify({ habits: payload }) })
        .then((saved) => { habits = saved; renderTracker(); })
        .catch((err) => console.error('failed to save habits:', err));
    };
    const saveSleep = () => {
      api(`/sleep/${year}/${month}`, { method: 'POST', body: JSON.stringify({ days: sleepDays }) })
        .catch((err) => console.error('failed to save sleep data:', err));
    };

    const monthlyStats = () => {
      const days = daysInMonth();
      const totalDays = habits.length * days;
      const completedDays = habits.reduce((sum, h) => sum + Object.keys(h.completions).length, 0);
      const percentage = totalDays > 0 ? (completedDays / totalDays) * 100 : 0;
      const best = habits.reduce((acc, h) => {
        const count = Object.keys(h.completions).length;
        return count > (acc.count || 0) ? { name: h.name, count } : acc;
      }, {});
      return { totalHabits: habits.length, totalDays, completedDays, percentage: percentage.toFixed(1), best };
    };

    const renderTracker = () => {
      const days = daysInMonth();
      $('month-title').textContent = new Date(year, month - 1).toLocaleString('default', { month: 'long', year: 'numeric' });

      if (!habits.length) {
        $('grid').innerHTML = '<p class="muted">No habits yet. Add one above.</p>';
      } else {
        let head = '<tr><th></th>';
        for (let d = 1; d <= days; d++) head += `<th>${d}</th>`;
        head += '<th>Progress</th><th></th></tr>';
        const rows = habits.map((h) => {
          let cells = `<td class="name">${h.name}</td>`;
          for (let d = 1; d <= days; d++) {
            const done = h.completions[d];
            cells += `<td><button class="day-btn${done ? ' done' : ''}" data-habit="${h.id}" data-day="${d}">${done ? '✓' : ''}</button></td>`;
          }
          const count = Object.keys(h.completions).length;
          const pct = ((count / days) * 100).toFixed(0);
          cells += `<td>${count}/${days}<div class="bar"><div style="width:${pct}%"></div></div></td>`;
          cells += `<td><button class="danger" data-delete="${h.id}">✕</button></td>`;
          return `<tr>${cells}</tr>`;
        }).join('');
        $('grid').innerHTML = `<table>${head}${rows}</table>`;
      }

      const stats = monthlyStats();
      $('month-stats').innerHTML = `
        <div class="stat"><div class="muted">Habits</div><div class="value">${stats.totalHabits}</div></div>
        <div class="stat"><div class="muted">Days completed</div><div class="value">${stats.completedDays}/${stats.totalDays}</div></div>
        <div class="stat"><div class="muted">Progress</div><div class="value">${stats.percentage}%</div></div>
        <div class="stat"><div class="muted">Best habit</div><div class="value">${stats.best.name || 'N/A'}</div>
          <div class="muted">${stats.best.count || 0} days</div></div>`;

      let sleepHead = '<tr>';
      let sleepRow = '<tr>';
      for (let d = 1; d <= days; d++) {
        sleepHead += `<th>${d}</th>`;
        const options = ['<option value=""></option>']
          .concat(HOURS.map((h) => `<option value="${h}"${sleepDays[d] === h ? ' selected' : ''}>${h}</option>`))
          .join('');
        sleepRow += `<td><select data-sleep-day="${d}">${options}</select></td>`;
      }
      $('sleep-grid').innerHTML = `<table>${sleepHead}</tr>${sleepRow}</tr></table>`;
    };

    const renderReport = async () => {
      $('report-view').innerHTML = '<p class="muted">Loading...</p>';
      let records = [];
      try { records = await api(`/habits/report/${year}`); }
      catch (err) { console.error('failed to load yearly report:', err); }

      const months = [];
      for (let m = 1; m <= 12; m++) {
        const inMonth = records.filter((h) => h.month === m);
        const label = new Date(year, m - 1).toLocaleString('default', { month: 'long' });
        if (!inMonth.length) {
          months.push({ label, totalHabits: 0, completedDays: 0, percentage: 0 });
          continue;
        }
        const days = new Date(year, m, 0).getDate();
        const totalDays = inMonth.length * days;
        const completedDays = inMonth.reduce((sum, h) => sum + Object.keys(h.completions || {}).length, 0);
        months.push({
          label,
          totalHabits: inMonth.length,
          completedDays,
          percentage: ((completedDays / totalDays) * 100).toFixed(1),
        });
      }

      const tracked = months.filter((m) => m.totalHabits > 0);
      const average = tracked.length
        ? (tracked.reduce((sum, m) => sum + parseFloat(m.percentage), 0) / tracked.length).toFixed(1)
        : 0;
      const totalCompleted = months.reduce((sum, m) => sum + m.completedDays, 0);

      $('report-view').innerHTML = `
        <h1 style="font-size:1.2rem">Year report &mdash; ${year}</h1>
        <div class="stats">
          <div class="stat"><div class="muted">Total days completed</div><div class="value">${totalCompleted}</div></div>
          <div class="stat"><div class="muted">Average completion</div><div class="value">${average}%</div></div>
          <div class="stat"><div class="muted">Months tracked</div><div class="value">${tracked.length}</div></div>
        </div>
        ${months.map((m) => `
          <div style="margin-top:10px">
            <div class="row spread"><span>${m.label}</span>
              <span class="muted">${m.completedDays} days &bull; ${m.percentage}%</span></div>
            <div class="bar"><div style="width:${m.percentage}%"></div></div>
          </div>`).join('')}`;
    };

    $('auth-mode').addEventListener('click', () => {
      registering = !registering;
      $('auth-submit').textContent = registering ? 'Register' : 'Login';
      $('auth-mode').textContent = registering ? 'Have an account? Login' : 'Need an account? Register';
      $('auth-error').textContent = '';
    });

    $('auth-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const username = $('auth-username').value.trim();
      const password = $('auth-password').value;
      if (!username || !password) {
        $('auth-error').textContent = 'Please fill in all fields';
        return;
      }
      try {
        const body = JSON.stringify({ username, password });
        const data = await api(registering ? '/auth/register' : '/auth/login', { method: 'POST', body });
        token = data.token; user = data.user;
        localStorage.setItem('token', token);
        localStorage.setItem('user', JSON.stringify(user));
        enter();
      } catch (err) {
        $('auth-error').textContent = err.message || 'Authentication failed';
      }
    });

    $('grid').addEventListener('click', (event) => {
      const btn = event.target.closest('button');
      if (!btn) return;
      if (btn.dataset.delete) {
        habits = habits.filter((h) => h.id !== btn.dataset.delete);
        renderTracker(); saveHabits();
        return;
      }
      if (btn.dataset.habit) {
        const habit = habits.find((h) => h.id === btn.dataset.habit);
        const day = Number(btn.dataset.day);
        if (habit.completions[day]) delete habit.completions[day];
        else habit.completions[day] = true;
        renderTracker(); saveHabits();
      }
    });

    $('sleep-grid').addEventListener('change', (event) => {
      const select = event.target.closest('select[data-sleep-day]');
      if (!select) return;
      const day = Number(select.dataset.sleepDay);
      if (select.value === '') delete sleepDays[day];
      else sleepDays[day] = Number(select.value);
      saveSleep();
    });

    $('add-habit').addEventListener('click', () => {
      const name = $('new-habit').value.trim();
      if (!name) return;
      habits.push({ id: 'local-' + Date.now(), name, completions: {} });
      $('new-habit').value = '';
      renderTracker(); saveHabits();
    });
    $('new-habit').addEventListener('keydown', (event) => {
      if (event.key === 'Enter') $('add-habit').click();
    });

    const shiftMonth = (delta) => {
      month += delta;
      if (month === 0) { month = 12; year -= 1; }
      if (month === 13) { month = 1; year += 1; }
      loadMonth();
    };
    $('prev-month').addEventListener('click', () => shiftMonth(-1));
    $('next-month').addEventListener('click', () => shiftMonth(1));
    $('logout').addEventListener('click', logout);
    $('tab-tracker').addEventListener('click', () => {
      $('tracker-view').classList.remove('hidden');
      $('report-view').classList.add('hidden');
      $('tab-tracker').classList.add('primary');
      $('tab-report').classList.remove('primary');
    });
    $('tab-report').addEventListener('click', () => {
      $('tracker-view').classList.add('hidden');
      $('report-view').classList.remove('hidden');
      $('tab-tracker').classList.remove('primary');
      $('tab-report').classList.add('primary');
      renderReport();
    });

    const enter = () => {
      $('login-card').classList.add('hidden');
      $('app').classList.remove('hidden');
      $('welcome').textContent = `Welcome, ${user.username}`;
      loadMonth();
    };

    if (token && user) enter();
  </script>
</body>
</html>
"#;
